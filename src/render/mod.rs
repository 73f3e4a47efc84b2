//! Cell surface, panel primitives and full-frame composition.

pub mod dashboard;
pub mod panels;
pub mod surface;

pub use dashboard::{Palette, compose};
pub use panels::{
    Level, PANEL_BG, battery_level, draw_box, draw_separator, print_at, print_centered,
    usage_level,
};
pub use surface::{Cell, CellBuffer, Style};
