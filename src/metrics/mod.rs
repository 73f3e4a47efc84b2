use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters for the refresh loop.
#[derive(Debug, Default, Clone)]
pub struct RuntimeMetrics {
    events: u64,
    samples: u64,
    full_renders: u64,
    background_renders: u64,
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_sample(&mut self) {
        self.samples = self.samples.saturating_add(1);
    }

    pub fn record_render(&mut self, background_only: bool) {
        if background_only {
            self.background_renders = self.background_renders.saturating_add(1);
        } else {
            self.full_renders = self.full_renders.saturating_add(1);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            events: self.events,
            samples: self.samples,
            full_renders: self.full_renders,
            background_renders: self.background_renders,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub samples: u64,
    pub full_renders: u64,
    pub background_renders: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "runtime_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("samples".to_string(), json!(self.samples));
        map.insert("full_renders".to_string(), json!(self.full_renders));
        map.insert(
            "background_renders".to_string(),
            json!(self.background_renders),
        );
        map
    }
}
