use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::error::Result;
use crate::geometry::Size;
use crate::width::char_width;

/// Foreground, background and weight for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Style {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Color::Reset, Color::Reset)
    }
}

/// Marker stored in the cell after a double-width character.
const CONTINUATION: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// Frame-sized grid of cells. Writes outside the grid are dropped, which is
/// what clips text that runs off either edge.
#[derive(Debug, Clone)]
pub struct CellBuffer {
    size: Size,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Reset every cell to a blank default-styled space.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize and clear. A no-op resize still clears.
    pub fn reset(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.cells = vec![Cell::default(); size.area()];
        } else {
            self.clear();
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    pub fn set(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell { ch, style };
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Write `text` left to right from `(x, y)`; returns the column after the
    /// last character.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        let mut col = x;
        for ch in text.chars() {
            let width = char_width(ch) as i32;
            self.set(col, y, ch, style);
            for pad in 1..width {
                self.set(col + pad, y, CONTINUATION, style);
            }
            col += width;
        }
        col
    }

    /// Characters on row `y`, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.size.height {
            return String::new();
        }
        let start = y as usize * self.size.width as usize;
        self.cells[start..start + self.size.width as usize]
            .iter()
            .filter(|cell| cell.ch != CONTINUATION)
            .map(|cell| cell.ch)
            .collect()
    }

    /// Paint the whole grid to `writer`. Style changes are only emitted when
    /// they differ from the previous cell.
    pub fn flush(&self, writer: &mut impl Write) -> Result<()> {
        let mut current: Option<Style> = None;

        for y in 0..self.size.height {
            queue!(writer, MoveTo(0, y))?;
            let start = y as usize * self.size.width as usize;
            for cell in &self.cells[start..start + self.size.width as usize] {
                if cell.ch == CONTINUATION {
                    continue;
                }
                if current != Some(cell.style) {
                    apply_style(writer, current, cell.style)?;
                    current = Some(cell.style);
                }
                queue!(writer, Print(sanitize(cell.ch)))?;
            }
        }

        queue!(writer, SetAttribute(Attribute::Reset), ResetColor)?;
        writer.flush()?;
        Ok(())
    }
}

fn apply_style(writer: &mut impl Write, previous: Option<Style>, next: Style) -> Result<()> {
    let was_bold = previous.map(|style| style.bold).unwrap_or(false);
    if next.bold && !was_bold {
        queue!(writer, SetAttribute(Attribute::Bold))?;
    } else if !next.bold && (was_bold || previous.is_none()) {
        queue!(writer, SetAttribute(Attribute::NormalIntensity))?;
    }
    queue!(
        writer,
        SetForegroundColor(next.fg),
        SetBackgroundColor(next.bg)
    )?;
    Ok(())
}

fn sanitize(ch: char) -> char {
    if ch.is_control() { ' ' } else { ch }
}
