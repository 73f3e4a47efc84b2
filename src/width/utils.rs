//! Terminal display width helpers.
//!
//! Provides ANSI-aware width calculation so centred text and glyph art stay
//! aligned with the cell grid.

use unicode_width::UnicodeWidthChar;

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Number of cells a single character occupies. Control characters count as one
/// so they still consume a slot in the grid.
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(1)
}
