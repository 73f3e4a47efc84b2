//! hexstat: a full-screen terminal status dashboard.
//!
//! Each frame is an animated hex-dump background with fixed panels of host
//! facts drawn on top. Drawing is immediate mode: every repaint is a pure
//! function of the frame size, the latest [`Snapshot`] and a fresh seed.
//! The modules follow the `mod.rs` orchestrator + private core layout so the
//! pure pieces can be tested without a terminal.

pub mod art;
pub mod error;
pub mod geometry;
pub mod hex;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod probe;
pub mod render;
pub mod runtime;
pub mod width;

pub use art::{ArtGlyph, placement, select};
pub use error::{DashError, Result};
pub use geometry::{Rect, Size};
pub use hex::{HexLine, HexPane, Lcg};
pub use layout::{LayoutPlan, MIN_HEIGHT, MIN_WIDTH, bytes_per_line};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, RuntimeMetrics};
pub use probe::{CpuTimes, FactSource, Snapshot, SystemProbe};
pub use render::{CellBuffer, Palette, Style, compose};
pub use runtime::driver::cli::{CliDriver, CliDriverError, DriverResult};
pub use runtime::{Dashboard, DashboardConfig, Exit, PowerAction, PowerError};
pub use width::display_width;
