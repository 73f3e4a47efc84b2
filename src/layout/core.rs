use crate::geometry::{Rect, Size};

/// Fewest bytes a hex row will show.
pub const MIN_BYTES_PER_LINE: usize = 8;
/// Most bytes a hex row will show.
pub const MAX_BYTES_PER_LINE: usize = 32;

pub const OS_BOX_MIN_WIDTH: u16 = 25;
pub const OS_BOX_MAX_WIDTH: u16 = 45;

/// Narrowest frame whose panels fit side by side without clipping.
pub const MIN_WIDTH: u16 = 44;
/// Shortest frame where the footer clears the power box.
pub const MIN_HEIGHT: u16 = 45;

const BANNER_ROW: u16 = 1;
const UPPER_BAND_ROW: u16 = 6;
const OS_BOX_HEIGHT: u16 = 12;
const SYSTEM_BOX_HEIGHT: u16 = 8;
const MIDDLE_BAND_ROW: u16 = 19;
const RESOURCES_BOX_HEIGHT: u16 = 9;
const CONNECTIVITY_BOX_HEIGHT: u16 = 15;
const POWER_BOX_ROW: u16 = 35;
const POWER_BOX_HEIGHT: u16 = 6;
const FOOTER_BOX_HEIGHT: u16 = 3;
const FOOTER_BOTTOM_OFFSET: u16 = 4;
const LEFT_MARGIN: u16 = 2;
const PANEL_GAP: u16 = 2;

/// Bytes per hex row for a terminal width.
///
/// `(width - 15) / 4` clamped to `[8, 32]`, rounded down to a multiple of 8.
/// The background generator calls this too so the panels line up with the
/// hex columns underneath them.
pub fn bytes_per_line(width: u16) -> usize {
    let max_bytes = (width as i32 - 15) / 4;
    let max_bytes = max_bytes.clamp(MIN_BYTES_PER_LINE as i32, MAX_BYTES_PER_LINE as i32) as usize;
    (max_bytes / 8) * 8
}

/// Width of one rendered hex row: address, hex field, gutter space, ASCII
/// field and the closing bar.
pub fn hex_width(bytes_per_line: usize) -> usize {
    10 + bytes_per_line * 3 + 1 + bytes_per_line + 1
}

/// Regions for one frame. Computed fresh every render and thrown away after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    pub frame: Size,
    pub bytes_per_line: usize,
    pub hex_width: u16,
    pub hex_banner: Rect,
    pub os_box: Rect,
    pub system_box: Rect,
    pub resources_box: Rect,
    pub connectivity_box: Rect,
    pub power_box: Rect,
    pub footer_box: Rect,
}

impl LayoutPlan {
    pub fn compute(frame: Size) -> Self {
        let bytes_per_line = bytes_per_line(frame.width);
        let hex_width = hex_width(bytes_per_line).min(u16::MAX as usize) as u16;

        let os_width =
            (hex_width.saturating_sub(8) / 6).clamp(OS_BOX_MIN_WIDTH, OS_BOX_MAX_WIDTH);
        let system_width = hex_width.saturating_sub(os_width).saturating_sub(6);
        let system_x = LEFT_MARGIN + os_width + PANEL_GAP;

        let half_width = hex_width.saturating_sub(6) / 2;
        let connectivity_x = LEFT_MARGIN + half_width + PANEL_GAP;
        let full_width = hex_width.saturating_sub(4);

        Self {
            frame,
            bytes_per_line,
            hex_width,
            hex_banner: Rect::new(0, BANNER_ROW, frame.width.saturating_sub(1), 1),
            os_box: Rect::new(LEFT_MARGIN, UPPER_BAND_ROW, os_width, OS_BOX_HEIGHT),
            system_box: Rect::new(system_x, UPPER_BAND_ROW, system_width, SYSTEM_BOX_HEIGHT),
            resources_box: Rect::new(
                LEFT_MARGIN,
                MIDDLE_BAND_ROW,
                half_width,
                RESOURCES_BOX_HEIGHT,
            ),
            connectivity_box: Rect::new(
                connectivity_x,
                MIDDLE_BAND_ROW,
                half_width,
                CONNECTIVITY_BOX_HEIGHT,
            ),
            power_box: Rect::new(LEFT_MARGIN, POWER_BOX_ROW, full_width, POWER_BOX_HEIGHT),
            footer_box: Rect::new(
                LEFT_MARGIN,
                frame.height.saturating_sub(FOOTER_BOTTOM_OFFSET),
                full_width,
                FOOTER_BOX_HEIGHT,
            ),
        }
    }

    /// The data-bearing panels, in draw order. The hex banner is part of the
    /// background and is not listed.
    pub fn panels(&self) -> [(&'static str, Rect); 6] {
        [
            ("os", self.os_box),
            ("system", self.system_box),
            ("resources", self.resources_box),
            ("connectivity", self.connectivity_box),
            ("power", self.power_box),
            ("footer", self.footer_box),
        ]
    }

    /// True when every panel sits inside the frame and no two panels overlap.
    pub fn fits(&self) -> bool {
        let bounds = Rect::from(self.frame);
        let panels = self.panels();

        let contained = panels.iter().all(|(_, rect)| bounds.contains_rect(rect));
        let disjoint = panels.iter().enumerate().all(|(idx, (_, a))| {
            panels[idx + 1..].iter().all(|(_, b)| !a.intersects(b))
        });

        contained && disjoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_100_uses_sixteen_bytes() {
        assert_eq!(bytes_per_line(100), 16);
        assert_eq!(hex_width(16), 76);

        let plan = LayoutPlan::compute(Size::new(100, 50));
        assert_eq!(plan.hex_width, 76);
        assert_eq!(plan.os_box, Rect::new(2, 6, 25, 12));
        assert_eq!(plan.system_box, Rect::new(29, 6, 45, 8));
        assert_eq!(plan.resources_box, Rect::new(2, 19, 35, 9));
        assert_eq!(plan.connectivity_box, Rect::new(39, 19, 35, 15));
        assert_eq!(plan.power_box, Rect::new(2, 35, 72, 6));
        assert_eq!(plan.footer_box, Rect::new(2, 46, 72, 3));
        assert!(plan.fits());
    }

    #[test]
    fn width_200_clamps_to_thirty_two_bytes() {
        assert_eq!(bytes_per_line(200), 32);
        assert_eq!(hex_width(32), 140);
    }

    #[test]
    fn narrow_terminal_still_gets_eight_bytes() {
        assert_eq!(bytes_per_line(0), 8);
        assert_eq!(bytes_per_line(20), 8);
        assert_eq!(bytes_per_line(54), 8);
        assert_eq!(bytes_per_line(79), 16);
    }

    #[test]
    fn os_box_width_is_clamped() {
        for width in [0u16, 40, 100, 400, u16::MAX] {
            let plan = LayoutPlan::compute(Size::new(width, 60));
            assert!(plan.os_box.width >= OS_BOX_MIN_WIDTH);
            assert!(plan.os_box.width <= OS_BOX_MAX_WIDTH);
        }
    }

    #[test]
    fn tiny_frame_degrades_without_panicking() {
        let plan = LayoutPlan::compute(Size::new(3, 2));
        assert_eq!(plan.footer_box.y, 0);
        assert_eq!(plan.hex_banner.width, 2);
        assert!(!plan.fits());
    }

    #[test]
    fn minimum_frame_fits() {
        assert!(LayoutPlan::compute(Size::new(MIN_WIDTH, MIN_HEIGHT)).fits());
        assert!(!LayoutPlan::compute(Size::new(MIN_WIDTH, MIN_HEIGHT - 1)).fits());
    }
}
