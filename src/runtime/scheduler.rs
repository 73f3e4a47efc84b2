use std::time::{Duration, Instant};

/// What the loop owes the screen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Re-sample facts and repaint everything.
    Full,
    /// Repaint with a fresh background, keeping the current facts.
    Background,
    Idle,
}

/// Two independent refresh timers measured against the last tick of each kind.
#[derive(Debug, Clone)]
pub struct Scheduler {
    data_interval: Duration,
    hex_interval: Duration,
    last_data: Instant,
    last_hex: Instant,
}

impl Scheduler {
    pub fn new(data_interval: Duration, hex_interval: Duration, now: Instant) -> Self {
        Self {
            data_interval,
            hex_interval,
            last_data: now,
            last_hex: now,
        }
    }

    /// Data refresh wins when both are due; a full repaint covers the
    /// background too.
    pub fn due(&self, now: Instant) -> Tick {
        if now.saturating_duration_since(self.last_data) >= self.data_interval {
            Tick::Full
        } else if now.saturating_duration_since(self.last_hex) >= self.hex_interval {
            Tick::Background
        } else {
            Tick::Idle
        }
    }

    /// A full render resets both timers.
    pub fn mark_full(&mut self, now: Instant) {
        self.last_data = now;
        self.last_hex = now;
    }

    pub fn mark_background(&mut self, now: Instant) {
        self.last_hex = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn idle_until_an_interval_elapses() {
        let start = Instant::now();
        let sched = Scheduler::new(secs(1.0), secs(2.0), start);
        assert_eq!(sched.due(start), Tick::Idle);
        assert_eq!(sched.due(start + secs(0.9)), Tick::Idle);
        assert_eq!(sched.due(start + secs(1.0)), Tick::Full);
    }

    #[test]
    fn full_render_resets_hex_timer() {
        let start = Instant::now();
        let mut sched = Scheduler::new(secs(3.0), secs(2.0), start);
        assert_eq!(sched.due(start + secs(2.0)), Tick::Background);
        sched.mark_background(start + secs(2.0));
        assert_eq!(sched.due(start + secs(3.0)), Tick::Full);
        sched.mark_full(start + secs(3.0));
        assert_eq!(sched.due(start + secs(4.5)), Tick::Idle);
        assert_eq!(sched.due(start + secs(5.0)), Tick::Background);
    }

    #[test]
    fn default_cadence_never_reaches_background() {
        let start = Instant::now();
        let mut sched = Scheduler::new(secs(1.0), secs(2.0), start);
        for step in 1..10 {
            let now = start + secs(step as f64);
            assert_eq!(sched.due(now), Tick::Full);
            sched.mark_full(now);
        }
    }

    #[test]
    fn fractional_hex_interval() {
        let start = Instant::now();
        let sched = Scheduler::new(secs(5.0), secs(0.5), start);
        assert_eq!(sched.due(start + secs(0.4)), Tick::Idle);
        assert_eq!(sched.due(start + secs(0.5)), Tick::Background);
    }
}
