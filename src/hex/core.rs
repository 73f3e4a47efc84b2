use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::geometry::Size;
use crate::layout::bytes_per_line;

/// Title tag shown in the banner row.
pub const BANNER_TAG: &str = "hexstat";

const SEED_MASK: u32 = 0x00FF_FFFF;
const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const LCG_MODULUS_MASK: u32 = 0x7FFF_FFFF;
/// One byte in this many is pulled into the 0x00..=0x0F palette range.
const PALETTE_BYTE_ODDS: u32 = 16;

/// Seed taken from the wall-clock microsecond count, truncated to 24 bits.
pub fn clock_seed() -> u32 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or(0);
    (micros as u32) & SEED_MASK
}

/// Linear congruential generator, `seed * 1103515245 + 12345 mod 2^31`.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u31(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MODULUS_MASK;
        self.state
    }

    /// Top byte of the next output.
    pub fn next_byte(&mut self) -> u8 {
        ((self.next_u31() >> 16) & 0xFF) as u8
    }
}

/// One row of the hex dump: an address and the bytes shown after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexLine {
    pub address: u32,
    pub bytes: Vec<u8>,
}

impl HexLine {
    /// Byte pairs separated by single spaces, with one extra space at the
    /// horizontal midpoint.
    pub fn hex_field(&self) -> String {
        let mid = self.bytes.len() / 2;
        let mut out = String::with_capacity(self.bytes.len() * 3 + 1);
        for (idx, byte) in self.bytes.iter().enumerate() {
            if idx > 0 {
                out.push(' ');
            }
            if idx == mid && idx > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{byte:02x}");
        }
        out
    }

    pub fn ascii_field(&self) -> String {
        self.bytes.iter().map(|&b| printable(b)).collect()
    }

    /// Full row text, padded with spaces or cut to `width - 1` columns.
    pub fn render(&self, width: u16) -> String {
        let mut line = format!(
            "{:08x}  {} |{}|",
            self.address,
            self.hex_field(),
            self.ascii_field()
        );
        fit_to(&mut line, width.saturating_sub(1) as usize);
        line
    }

    /// Column where byte `index` starts within [`HexLine::render`] output.
    pub fn byte_column(&self, index: usize) -> usize {
        let gap = usize::from(index >= self.bytes.len() / 2 && index > 0);
        10 + index * 3 + gap
    }
}

fn printable(byte: u8) -> char {
    if (0x20..=0x7E).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

fn fit_to(line: &mut String, width: usize) {
    let len = line.chars().count();
    if len < width {
        line.extend(std::iter::repeat_n(' ', width - len));
    } else if len > width {
        let cut = line
            .char_indices()
            .nth(width)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len());
        line.truncate(cut);
    }
}

/// A full screen of hex lines, one per terminal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexPane {
    pub bytes_per_line: usize,
    pub lines: Vec<HexLine>,
}

impl HexPane {
    /// Build the pane for `frame` from `seed`. The same inputs always give
    /// byte-identical output.
    pub fn generate(frame: Size, seed: u32) -> Self {
        let bytes_per_line = bytes_per_line(frame.width);
        let mut rng = Lcg::new(seed);
        let mid = bytes_per_line / 2;

        let lines = (0..frame.height as usize)
            .map(|row| {
                let bytes = (0..bytes_per_line)
                    .map(|col| {
                        let mut byte = rng.next_byte();
                        if rng.next_u31() % PALETTE_BYTE_ODDS == 0 {
                            byte &= 0x0F;
                        }
                        if col % 4 == 0 {
                            byte &= 0xF0;
                        }
                        if col == mid {
                            byte = 0x00;
                        }
                        byte
                    })
                    .collect();
                HexLine {
                    address: (row * bytes_per_line) as u32,
                    bytes,
                }
            })
            .collect();

        Self {
            bytes_per_line,
            lines,
        }
    }

    /// Fixed title row: `tag` as the leading bytes, a null terminator, then
    /// space padding. Always addressed at zero.
    pub fn banner(width: u16, tag: &str) -> HexLine {
        let bytes_per_line = bytes_per_line(width);
        let tag = tag.as_bytes();
        let bytes = (0..bytes_per_line)
            .map(|idx| match idx.cmp(&tag.len()) {
                std::cmp::Ordering::Less => tag[idx],
                std::cmp::Ordering::Equal => 0x00,
                std::cmp::Ordering::Greater => 0x20,
            })
            .collect();
        HexLine { address: 0, bytes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_matches_reference_sequence() {
        let mut rng = Lcg::new(1);
        assert_eq!(rng.next_u31(), 1_103_527_590);
        assert_eq!(rng.next_u31(), 377_401_575);
    }

    #[test]
    fn hex_field_has_gap_at_midpoint() {
        let line = HexLine {
            address: 0,
            bytes: (0u8..8).collect(),
        };
        assert_eq!(line.hex_field(), "00 01 02 03  04 05 06 07");
        assert_eq!(line.byte_column(3), 19);
        assert_eq!(line.byte_column(4), 23);
    }

    #[test]
    fn ascii_field_masks_unprintable() {
        let line = HexLine {
            address: 0,
            bytes: vec![0x41, 0x00, 0x7E, 0x7F, 0x20, 0x1F, 0xFF, 0x7A],
        };
        assert_eq!(line.ascii_field(), "A.~. ..z");
    }

    #[test]
    fn render_pads_to_width() {
        let line = HexLine {
            address: 0x10,
            bytes: vec![0x41; 8],
        };
        let text = line.render(60);
        assert_eq!(text.chars().count(), 59);
        assert!(text.starts_with("00000010  41 41 41 41  41 41 41 41 |AAAAAAAA|"));
        assert_eq!(line.render(12), "00000010  4");
    }

    #[test]
    fn generated_rows_follow_alignment_rules() {
        let pane = HexPane::generate(Size::new(100, 30), 0x00AB_CDEF);
        assert_eq!(pane.bytes_per_line, 16);
        assert_eq!(pane.lines.len(), 30);
        for (row, line) in pane.lines.iter().enumerate() {
            assert_eq!(line.address as usize, row * 16);
            assert_eq!(line.bytes[8], 0);
            for (col, byte) in line.bytes.iter().enumerate() {
                if col % 4 == 0 {
                    assert_eq!(byte & 0x0F, 0);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_pane() {
        let frame = Size::new(120, 40);
        assert_eq!(HexPane::generate(frame, 42), HexPane::generate(frame, 42));
        assert_ne!(HexPane::generate(frame, 42), HexPane::generate(frame, 43));
    }

    #[test]
    fn banner_embeds_tag() {
        let banner = HexPane::banner(100, BANNER_TAG);
        assert_eq!(banner.bytes.len(), 16);
        assert_eq!(&banner.bytes[..7], b"hexstat");
        assert_eq!(banner.bytes[7], 0);
        assert!(banner.bytes[8..].iter().all(|&b| b == 0x20));
        assert_eq!(banner.ascii_field(), "hexstat.        ");
    }

    #[test]
    fn clock_seed_fits_in_24_bits() {
        assert!(clock_seed() <= 0x00FF_FFFF);
    }
}
