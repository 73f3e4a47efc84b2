//! Layout module orchestrator.
//!
//! Turns a terminal frame into the fixed set of dashboard regions. The
//! implementation details live in the private `core` module.

mod core;

pub use core::{
    LayoutPlan, MAX_BYTES_PER_LINE, MIN_BYTES_PER_LINE, MIN_HEIGHT, MIN_WIDTH, OS_BOX_MAX_WIDTH,
    OS_BOX_MIN_WIDTH, bytes_per_line, hex_width,
};
