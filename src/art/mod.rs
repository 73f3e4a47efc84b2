//! Operating system glyph art and its placement inside the OS panel.

mod glyphs;
mod select;

pub use glyphs::{ArtGlyph, DEFAULT_GLYPH, GLYPHS};
pub use select::{MatchRule, RULES, placement, select};
