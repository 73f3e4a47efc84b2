use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::terminal;
use serde_json::{Value, json};

use crate::hex::clock_seed;
use crate::logging::{FileSink, LogLevel, Logger, LoggingResult, event_with_fields, json_kv};
use crate::metrics::RuntimeMetrics;
use crate::probe::{CpuTimes, FactSource, Snapshot};
use crate::render::{CellBuffer, Palette, compose};
use crate::{Result, Size};

pub mod driver;
pub mod input;
pub mod power;
pub mod scheduler;

pub use input::{Action, classify};
pub use power::{PowerAction, PowerError};
pub use scheduler::{Scheduler, Tick};

const RUNTIME_TARGET: &str = "hexstat::runtime";
const DEFAULT_LOG_MAX_BYTES: u64 = 1024 * 1024;

/// Configuration knobs for the dashboard loop.
#[derive(Clone)]
pub struct DashboardConfig {
    /// Interval between fact samples (each followed by a full repaint).
    pub data_interval: Duration,
    /// Interval between background-only repaints.
    pub hex_interval: Duration,
    /// Upper bound on how long one loop iteration waits for input.
    pub poll_timeout: Duration,
    /// Power supply directory holding `capacity` and `status`.
    pub battery_path: PathBuf,
    pub reboot_command: String,
    pub shutdown_command: String,
    pub palette: Palette,
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Interval between metrics snapshot log events. Zero disables snapshots.
    pub metrics_interval: Duration,
    pub metrics_target: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_interval: Duration::from_secs(1),
            hex_interval: Duration::from_secs(2),
            poll_timeout: Duration::from_millis(100),
            battery_path: PathBuf::from("/sys/class/power_supply/BAT0"),
            reboot_command: "PATH=/usr/bin:/bin:/sbin:/usr/sbin doas reboot".to_string(),
            shutdown_command: "PATH=/usr/bin:/bin:/sbin:/usr/sbin doas shutdown -h now"
                .to_string(),
            palette: Palette::default(),
            logger: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "hexstat::runtime.metrics".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Defaults plus environment overrides:
    /// `HEXSTAT_LOG` (log file path), `HEXSTAT_LOG_LEVEL`,
    /// `HEXSTAT_BATTERY` (power supply directory).
    pub fn from_env() -> LoggingResult<Self> {
        let mut config = Self::default();

        if let Some(path) = env::var_os("HEXSTAT_BATTERY") {
            config.battery_path = PathBuf::from(path);
        }

        if let Some(path) = env::var_os("HEXSTAT_LOG") {
            let level = env::var("HEXSTAT_LOG_LEVEL")
                .ok()
                .and_then(|name| LogLevel::parse(&name))
                .unwrap_or(LogLevel::Info);
            let sink = FileSink::new(PathBuf::from(path), DEFAULT_LOG_MAX_BYTES)?;
            config.logger = Some(Logger::new(sink).with_min_level(level));
        }

        Ok(config)
    }

    pub fn with_data_interval(mut self, interval: Duration) -> Self {
        self.data_interval = interval;
        self
    }

    pub fn with_hex_interval(mut self, interval: Duration) -> Self {
        self.hex_interval = interval;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn command_for(&self, action: PowerAction) -> &str {
        match action {
            PowerAction::Reboot => &self.reboot_command,
            PowerAction::Shutdown => &self.shutdown_command,
        }
    }
}

/// What triggered a repaint. Only background repaints reuse the previous
/// sample without a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderKind {
    Full,
    Background,
    Resize,
}

impl RenderKind {
    fn label(self) -> &'static str {
        match self {
            RenderKind::Full => "full",
            RenderKind::Background => "background",
            RenderKind::Resize => "resize",
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// Restore the terminal, then run this action.
    Power(PowerAction),
}

/// The refresh loop: owns the current facts, the CPU carry and both timers.
///
/// Every repaint is a pure function of the frame size, the snapshot and a
/// fresh seed; nothing is retained between frames except the cell buffer's
/// allocation.
pub struct Dashboard<S: FactSource> {
    source: S,
    config: DashboardConfig,
    scheduler: Scheduler,
    snapshot: Snapshot,
    carry: CpuTimes,
    buffer: CellBuffer,
    metrics: RuntimeMetrics,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl<S: FactSource> Dashboard<S> {
    pub fn new(source: S, config: DashboardConfig) -> Self {
        let scheduler = Scheduler::new(config.data_interval, config.hex_interval, Instant::now());
        Self {
            source,
            config,
            scheduler,
            snapshot: Snapshot::default(),
            carry: CpuTimes::default(),
            buffer: CellBuffer::new(Size::new(0, 0)),
            metrics: RuntimeMetrics::new(),
            start_instant: None,
            last_metrics_emit: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn metrics(&self) -> &RuntimeMetrics {
        &self.metrics
    }

    /// The buffer as of the last repaint.
    pub fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    /// Live loop against the real terminal. The frame size is read again for
    /// every repaint so a resize shows up on the next draw.
    pub fn run(&mut self, out: &mut impl Write) -> Result<Exit> {
        self.bootstrap(out, current_frame()?, Instant::now())?;

        let exit = loop {
            self.tick(out, current_frame()?, Instant::now())?;

            if event::poll(self.config.poll_timeout)? {
                let event = event::read()?;
                if let Some(exit) = self.handle_event(out, &event)? {
                    break exit;
                }
            }

            self.maybe_emit_metrics(Instant::now());
        };

        self.finalize();
        Ok(exit)
    }

    /// Sample once and paint the first frame, then start both timers.
    pub fn bootstrap(&mut self, out: &mut impl Write, frame: Size, now: Instant) -> Result<()> {
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);
        self.scheduler = Scheduler::new(self.config.data_interval, self.config.hex_interval, now);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("width", json!(frame.width)),
                json_kv("height", json!(frame.height)),
                json_kv("data_interval_ms", json!(self.config.data_interval.as_millis() as u64)),
                json_kv("hex_interval_ms", json!(self.config.hex_interval.as_millis() as u64)),
            ],
        );
        self.resample();
        self.render(out, frame, RenderKind::Full)?;
        self.scheduler.mark_full(now);
        Ok(())
    }

    /// One loop iteration: timers first, then the event if there was one.
    pub fn step(
        &mut self,
        out: &mut impl Write,
        frame: Size,
        now: Instant,
        event: Option<&Event>,
    ) -> Result<Option<Exit>> {
        self.tick(out, frame, now)?;
        match event {
            Some(event) => self.handle_event(out, event),
            None => Ok(None),
        }
    }

    fn tick(&mut self, out: &mut impl Write, frame: Size, now: Instant) -> Result<Tick> {
        let tick = self.scheduler.due(now);
        match tick {
            Tick::Full => {
                self.resample();
                self.render(out, frame, RenderKind::Full)?;
                self.scheduler.mark_full(now);
            }
            Tick::Background => {
                self.render(out, frame, RenderKind::Background)?;
                self.scheduler.mark_background(now);
            }
            Tick::Idle => {}
        }
        Ok(tick)
    }

    fn handle_event(&mut self, out: &mut impl Write, event: &Event) -> Result<Option<Exit>> {
        self.metrics.record_event();
        match classify(event) {
            Action::Quit => {
                self.log_runtime_event(
                    LogLevel::Info,
                    "exit_requested",
                    [json_kv("action", json!("quit"))],
                );
                Ok(Some(Exit::Quit))
            }
            Action::Power(action) => {
                self.log_runtime_event(
                    LogLevel::Info,
                    "exit_requested",
                    [json_kv("action", json!(action))],
                );
                Ok(Some(Exit::Power(action)))
            }
            Action::Redraw(frame) => {
                self.log_runtime_event(
                    LogLevel::Info,
                    "resized",
                    [
                        json_kv("width", json!(frame.width)),
                        json_kv("height", json!(frame.height)),
                    ],
                );
                self.render(out, frame, RenderKind::Resize)?;
                Ok(None)
            }
            Action::Ignore => Ok(None),
        }
    }

    fn resample(&mut self) {
        let (snapshot, carry) = self.source.sample(self.carry);
        self.snapshot = snapshot;
        self.carry = carry;
        self.metrics.record_sample();
        self.log_runtime_event(
            LogLevel::Debug,
            "sample_collected",
            [
                json_kv(
                    "snapshot",
                    serde_json::to_value(&self.snapshot).unwrap_or(Value::Null),
                ),
            ],
        );
    }

    fn render(&mut self, out: &mut impl Write, frame: Size, kind: RenderKind) -> Result<()> {
        self.buffer.reset(frame);
        compose(
            &mut self.buffer,
            &self.snapshot,
            clock_seed(),
            &self.config.palette,
            self.config.data_interval,
        );
        self.buffer.flush(out)?;
        self.metrics.record_render(kind == RenderKind::Background);
        self.log_runtime_event(
            LogLevel::Trace,
            "render_completed",
            [
                json_kv("kind", json!(kind.label())),
                json_kv("width", json!(frame.width)),
                json_kv("height", json!(frame.height)),
            ],
        );
        Ok(())
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(uptime_ms))],
        );
    }

    fn maybe_emit_metrics(&mut self, now: Instant) {
        if self.config.metrics_interval.is_zero() {
            return;
        }

        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => return,
            _ => self.last_metrics_emit = Some(now),
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let Some(logger) = self.config.logger.as_ref() {
            let event = self
                .metrics
                .snapshot(uptime)
                .to_log_event(&self.config.metrics_target);
            let _ = logger.log_event(event);
        }
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            if logger.enabled(level) {
                let event = event_with_fields(level, RUNTIME_TARGET, message, fields);
                let _ = logger.log_event(event);
            }
        }
    }
}

fn current_frame() -> Result<Size> {
    let (width, height) = terminal::size()?;
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::{Arc, Mutex};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::logging::{LogEvent, LogSink};
    use crate::probe::Gauge;

    /// Counts samples and reports the count as the CPU reading.
    #[derive(Default)]
    struct CountingSource {
        calls: Cell<u64>,
    }

    impl FactSource for CountingSource {
        fn sample(&self, carry: CpuTimes) -> (Snapshot, CpuTimes) {
            self.calls.set(self.calls.get() + 1);
            let n = self.calls.get();
            let snapshot = Snapshot {
                cpu: Gauge::new(n as u8, format!("{n}%")),
                ..Snapshot::default()
            };
            (
                snapshot,
                CpuTimes {
                    idle: carry.idle + 1,
                    total: carry.total + 2,
                },
            )
        }
    }

    #[derive(Clone, Default)]
    struct MemorySink(Arc<Mutex<Vec<LogEvent>>>);

    impl LogSink for MemorySink {
        fn log(&self, event: &LogEvent) -> LoggingResult<()> {
            self.0.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    const FRAME: Size = Size::new(100, 50);

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn key(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
    }

    fn dashboard(data: f64, hex: f64) -> Dashboard<CountingSource> {
        let config = DashboardConfig::default()
            .with_data_interval(secs(data))
            .with_hex_interval(secs(hex));
        Dashboard::new(CountingSource::default(), config)
    }

    #[test]
    fn bootstrap_samples_and_paints() {
        let mut dash = dashboard(1.0, 2.0);
        let mut out = Vec::new();
        dash.bootstrap(&mut out, FRAME, Instant::now()).unwrap();
        assert_eq!(dash.source.calls.get(), 1);
        assert!(!out.is_empty());
        assert_eq!(dash.buffer().size(), FRAME);
        assert_eq!(dash.metrics().snapshot(Duration::ZERO).full_renders, 1);
    }

    #[test]
    fn data_tick_resamples_and_resets_both_timers() {
        let mut dash = dashboard(1.0, 1.5);
        let start = Instant::now();
        let mut sink = Vec::new();
        dash.bootstrap(&mut sink, FRAME, start).unwrap();

        dash.step(&mut sink, FRAME, start + secs(1.0), None).unwrap();
        assert_eq!(dash.source.calls.get(), 2);
        assert_eq!(dash.scheduler.due(start + secs(1.6)), Tick::Idle);
        assert_eq!(dash.scheduler.due(start + secs(2.0)), Tick::Full);
    }

    #[test]
    fn hex_tick_repaints_without_resampling() {
        let mut dash = dashboard(5.0, 2.0);
        let start = Instant::now();
        let mut sink = Vec::new();
        dash.bootstrap(&mut sink, FRAME, start).unwrap();

        let before = dash.snapshot().clone();
        let mut out = Vec::new();
        dash.step(&mut out, FRAME, start + secs(2.0), None).unwrap();
        assert!(!out.is_empty());
        assert_eq!(dash.source.calls.get(), 1);
        assert_eq!(dash.snapshot(), &before);

        let snapshot = dash.metrics().snapshot(Duration::ZERO);
        assert_eq!(snapshot.background_renders, 1);
        assert_eq!(snapshot.full_renders, 1);

        dash.step(&mut sink, FRAME, start + secs(5.0), None).unwrap();
        assert_eq!(dash.source.calls.get(), 2);
    }

    #[test]
    fn idle_iteration_writes_nothing() {
        let mut dash = dashboard(1.0, 2.0);
        let start = Instant::now();
        let mut sink = Vec::new();
        dash.bootstrap(&mut sink, FRAME, start).unwrap();

        let mut out = Vec::new();
        let exit = dash
            .step(&mut out, FRAME, start + secs(0.5), Some(&key('x')))
            .unwrap();
        assert_eq!(exit, None);
        assert!(out.is_empty());
    }

    #[test]
    fn cpu_carry_is_threaded_between_samples() {
        let mut dash = dashboard(1.0, 2.0);
        let start = Instant::now();
        let mut sink = Vec::new();
        dash.bootstrap(&mut sink, FRAME, start).unwrap();
        dash.step(&mut sink, FRAME, start + secs(1.0), None).unwrap();
        assert_eq!(dash.carry, CpuTimes { idle: 2, total: 4 });
        assert_eq!(dash.snapshot().cpu.text, "2%");
    }

    #[test]
    fn quit_and_power_keys_end_the_loop() {
        let mut dash = dashboard(1.0, 2.0);
        let start = Instant::now();
        let mut sink = Vec::new();
        dash.bootstrap(&mut sink, FRAME, start).unwrap();

        let at = start + secs(0.1);
        assert_eq!(
            dash.step(&mut sink, FRAME, at, Some(&key('q'))).unwrap(),
            Some(Exit::Quit)
        );
        assert_eq!(
            dash.step(&mut sink, FRAME, at, Some(&key('r'))).unwrap(),
            Some(Exit::Power(PowerAction::Reboot))
        );
        assert_eq!(
            dash.step(&mut sink, FRAME, at, Some(&key('s'))).unwrap(),
            Some(Exit::Power(PowerAction::Shutdown))
        );
    }

    #[test]
    fn resize_repaints_at_new_size_immediately() {
        let mut dash = dashboard(1.0, 2.0);
        let start = Instant::now();
        let mut sink = Vec::new();
        dash.bootstrap(&mut sink, FRAME, start).unwrap();

        let mut out = Vec::new();
        let resized = Event::Resize(140, 60);
        dash.step(&mut out, FRAME, start + secs(0.2), Some(&resized))
            .unwrap();
        assert!(!out.is_empty());
        assert_eq!(dash.buffer().size(), Size::new(140, 60));
        assert_eq!(dash.source.calls.get(), 1);

        let counts = dash.metrics().snapshot(Duration::ZERO);
        assert_eq!(counts.full_renders, 2);
        assert_eq!(counts.background_renders, 0);
    }

    #[test]
    fn runtime_events_are_logged() {
        let sink = MemorySink::default();
        let logger = Logger::new(sink.clone()).with_min_level(LogLevel::Debug);
        let mut dash = Dashboard::new(
            CountingSource::default(),
            DashboardConfig::default().with_logger(logger),
        );
        let mut out = Vec::new();
        let start = Instant::now();
        dash.bootstrap(&mut out, FRAME, start).unwrap();
        dash.step(&mut out, FRAME, start, Some(&Event::Resize(80, 45)))
            .unwrap();

        let events = sink.0.lock().unwrap();
        let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["runtime_started", "sample_collected", "resized"]);
        assert!(events.iter().all(|e| e.target == RUNTIME_TARGET));

        let sampled = &events[1].fields["snapshot"];
        assert_eq!(sampled["cpu"]["text"], "1%");
        assert_eq!(sampled["os_id"], "linux");
        assert_eq!(sampled["vpn"], "Unknown");
    }

    #[test]
    fn render_events_carry_their_trigger() {
        let sink = MemorySink::default();
        let logger = Logger::new(sink.clone()).with_min_level(LogLevel::Trace);
        let config = DashboardConfig::default()
            .with_data_interval(secs(5.0))
            .with_hex_interval(secs(2.0))
            .with_logger(logger);
        let mut dash = Dashboard::new(CountingSource::default(), config);
        let mut out = Vec::new();
        let start = Instant::now();
        dash.bootstrap(&mut out, FRAME, start).unwrap();
        dash.step(&mut out, FRAME, start + secs(2.0), Some(&Event::Resize(90, 45)))
            .unwrap();

        let events = sink.0.lock().unwrap();
        let kinds: Vec<&str> = events
            .iter()
            .filter(|e| e.message == "render_completed")
            .filter_map(|e| e.fields["kind"].as_str())
            .collect();
        assert_eq!(kinds, ["full", "background", "resize"]);

        let counts = dash.metrics().snapshot(Duration::ZERO);
        assert_eq!(counts.full_renders, 2);
        assert_eq!(counts.background_renders, 1);
    }

    #[test]
    fn power_commands_come_from_config() {
        let config = DashboardConfig::default();
        assert!(config.command_for(PowerAction::Reboot).ends_with("reboot"));
        assert!(config
            .command_for(PowerAction::Shutdown)
            .ends_with("shutdown -h now"));
    }
}
