//! Drawing primitives for the bordered data panels.

use crossterm::style::Color;

use crate::geometry::Rect;
use crate::width::display_width;

use super::surface::{CellBuffer, Style};

/// Background used inside every panel so the hex pane does not show through.
pub const PANEL_BG: Color = Color::Black;

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const TEE_LEFT: char = '├';
const TEE_RIGHT: char = '┤';

/// Severity bucket for a percentage readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Critical,
    Warning,
    Nominal,
}

impl Level {
    pub fn color(self) -> Color {
        match self {
            Level::Critical => Color::DarkRed,
            Level::Warning => Color::DarkYellow,
            Level::Nominal => Color::DarkGreen,
        }
    }
}

/// Memory and CPU: high is bad.
pub fn usage_level(percent: u8) -> Level {
    if percent > 80 {
        Level::Critical
    } else if percent > 60 {
        Level::Warning
    } else {
        Level::Nominal
    }
}

/// Battery: low is bad.
pub fn battery_level(percent: u8) -> Level {
    if percent < 20 {
        Level::Critical
    } else if percent < 50 {
        Level::Warning
    } else {
        Level::Nominal
    }
}

/// Solid-filled box with a single-line border and an optional title set into
/// the top edge.
pub fn draw_box(buf: &mut CellBuffer, rect: Rect, title: &str, fg: Color) {
    if rect.is_empty() {
        return;
    }

    let style = Style::new(fg, PANEL_BG);
    let (x, y) = (rect.x as i32, rect.y as i32);
    let (right, bottom) = (rect.right() as i32 - 1, rect.bottom() as i32 - 1);

    for row in y..=bottom {
        for col in x..=right {
            buf.set(col, row, ' ', style);
        }
    }

    for col in x + 1..right {
        buf.set(col, y, HORIZONTAL, style);
        buf.set(col, bottom, HORIZONTAL, style);
    }
    for row in y + 1..bottom {
        buf.set(x, row, VERTICAL, style);
        buf.set(right, row, VERTICAL, style);
    }
    buf.set(x, y, TOP_LEFT, style);
    buf.set(right, y, TOP_RIGHT, style);
    buf.set(x, bottom, BOTTOM_LEFT, style);
    buf.set(right, bottom, BOTTOM_RIGHT, style);

    if !title.is_empty() {
        let len = display_width(title) as i32;
        let title_x = x + (rect.width as i32 - len - 2) / 2;
        buf.set(title_x, y, TEE_LEFT, style);
        let end = buf.put_str(title_x + 1, y, title, style.bold());
        buf.set(end, y, TEE_RIGHT, style);
    }
}

/// Horizontal rule with T-junctions at both ends.
pub fn draw_separator(buf: &mut CellBuffer, x: u16, y: u16, width: u16, fg: Color) {
    if width == 0 {
        return;
    }
    let style = Style::new(fg, PANEL_BG);
    let (x, y, right) = (x as i32, y as i32, x as i32 + width as i32 - 1);
    buf.set(x, y, TEE_LEFT, style);
    for col in x + 1..right {
        buf.set(col, y, HORIZONTAL, style);
    }
    buf.set(right, y, TEE_RIGHT, style);
}

pub fn print_at(buf: &mut CellBuffer, text: &str, x: i32, y: i32, style: Style) {
    buf.put_str(x, y, text, style);
}

/// Centre `text` within `width` columns starting at `x`. Text wider than the
/// span starts left of `x`; the buffer clips whatever falls off the grid.
pub fn print_centered(buf: &mut CellBuffer, text: &str, x: u16, y: u16, width: u16, style: Style) {
    let len = display_width(text) as i32;
    let start = x as i32 + (width as i32 - len) / 2;
    buf.put_str(start, y as i32, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn thresholds_cover_every_percentage() {
        assert_eq!(usage_level(0), Level::Nominal);
        assert_eq!(usage_level(60), Level::Nominal);
        assert_eq!(usage_level(61), Level::Warning);
        assert_eq!(usage_level(80), Level::Warning);
        assert_eq!(usage_level(81), Level::Critical);
        assert_eq!(usage_level(100), Level::Critical);

        assert_eq!(battery_level(0), Level::Critical);
        assert_eq!(battery_level(19), Level::Critical);
        assert_eq!(battery_level(20), Level::Warning);
        assert_eq!(battery_level(49), Level::Warning);
        assert_eq!(battery_level(50), Level::Nominal);
        assert_eq!(battery_level(100), Level::Nominal);
    }

    #[test]
    fn box_has_border_and_title() {
        let mut buf = CellBuffer::new(Size::new(12, 4));
        draw_box(&mut buf, Rect::new(0, 0, 12, 4), " OS ", Color::DarkCyan);
        assert_eq!(buf.row_text(0), "┌──├ OS ┤──┐");
        assert_eq!(buf.row_text(1), "│          │");
        assert_eq!(buf.row_text(3), "└──────────┘");
        let title = buf.get(4, 0).unwrap();
        assert!(title.style.bold);
        assert_eq!(title.style.bg, PANEL_BG);
    }

    #[test]
    fn box_interior_overwrites_background() {
        let mut buf = CellBuffer::new(Size::new(5, 3));
        for y in 0..3 {
            buf.put_str(0, y, "xxxxx", Style::default());
        }
        draw_box(&mut buf, Rect::new(0, 0, 5, 3), "", Color::White);
        assert_eq!(buf.row_text(1), "│   │");
        assert_eq!(buf.get(2, 1).unwrap().style.bg, PANEL_BG);
    }

    #[test]
    fn separator_uses_tee_junctions() {
        let mut buf = CellBuffer::new(Size::new(6, 1));
        draw_separator(&mut buf, 1, 0, 4, Color::DarkGreen);
        assert_eq!(buf.row_text(0), " ├──┤ ");
    }

    #[test]
    fn centred_text_uses_floor_division() {
        let mut buf = CellBuffer::new(Size::new(10, 1));
        print_centered(&mut buf, "abc", 0, 0, 10, Style::default());
        assert_eq!(buf.row_text(0), "   abc    ");
    }

    #[test]
    fn overlong_centred_text_starts_off_the_left_edge() {
        let mut buf = CellBuffer::new(Size::new(4, 1));
        print_centered(&mut buf, "abcdefgh", 0, 0, 4, Style::default());
        // start = (4 - 8) / 2 = -2
        assert_eq!(buf.row_text(0), "cdef");
    }
}
