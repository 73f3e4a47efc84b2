//! Terminal display width helpers.

mod utils;

pub use utils::{char_width, display_width};
