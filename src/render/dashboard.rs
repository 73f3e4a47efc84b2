//! Full-frame composition: hex background first, then the opaque panels.

use std::time::Duration;

use crossterm::style::Color;

use crate::art::{placement, select};
use crate::geometry::Rect;
use crate::hex::{BANNER_TAG, HexLine, HexPane};
use crate::layout::LayoutPlan;
use crate::probe::{Snapshot, VpnStatus};

use super::panels::{
    PANEL_BG, battery_level, draw_box, draw_separator, print_at, print_centered, usage_level,
};
use super::surface::{CellBuffer, Style};

/// Colour per data element. Static for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub time: Color,
    pub uptime: Color,
    pub memory: Color,
    pub network: Color,
    pub battery: Color,
    pub vpn: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            time: Color::DarkYellow,
            uptime: Color::DarkGreen,
            memory: Color::DarkBlue,
            network: Color::DarkCyan,
            battery: Color::DarkMagenta,
            vpn: Color::Grey,
        }
    }
}

const HEX_STYLE: Style = Style::new(Color::DarkGrey, Color::Reset);
const BANNER_STYLE: Style = Style::new(Color::DarkGreen, Color::Black).bold();
const LABEL_STYLE: Style = Style::new(Color::Grey, PANEL_BG).bold();

/// Draw one complete frame into `buf`.
///
/// The output depends only on the buffer size, `snapshot`, `seed` and the
/// static palette; nothing from the previous frame survives.
pub fn compose(
    buf: &mut CellBuffer,
    snapshot: &Snapshot,
    seed: u32,
    palette: &Palette,
    data_interval: Duration,
) {
    buf.clear();
    let frame = buf.size();
    let plan = LayoutPlan::compute(frame);

    draw_hex_pane(buf, &HexPane::generate(frame, seed), frame.width);
    draw_banner(buf, &plan);
    draw_os(buf, plan.os_box, &snapshot.os_id);
    draw_system(buf, plan.system_box, snapshot, palette);
    draw_resources(buf, plan.resources_box, snapshot, palette);
    draw_connectivity(buf, plan.connectivity_box, snapshot, palette);
    draw_power(buf, plan.power_box, snapshot, palette);
    draw_footer(buf, plan.footer_box, data_interval);
}

fn draw_hex_pane(buf: &mut CellBuffer, pane: &HexPane, width: u16) {
    let limit = width.saturating_sub(1) as usize;
    for (row, line) in pane.lines.iter().enumerate() {
        let y = row as i32;
        buf.put_str(0, y, &line.render(width), HEX_STYLE);
        tint_palette_bytes(buf, line, y, limit);
    }
}

/// Bytes in 0x01..=0x0F are drawn in the matching 16-colour palette entry.
fn tint_palette_bytes(buf: &mut CellBuffer, line: &HexLine, y: i32, limit: usize) {
    for (idx, &byte) in line.bytes.iter().enumerate() {
        if byte == 0 || byte > 0x0F {
            continue;
        }
        let col = line.byte_column(idx);
        if col + 2 > limit {
            break;
        }
        let style = Style::new(Color::AnsiValue(byte), Color::Reset);
        buf.put_str(col as i32, y, &format!("{byte:02x}"), style);
    }
}

fn draw_banner(buf: &mut CellBuffer, plan: &LayoutPlan) {
    let banner = HexPane::banner(plan.frame.width, BANNER_TAG);
    let Rect { x, y, .. } = plan.hex_banner;
    print_at(
        buf,
        &banner.render(plan.frame.width),
        x as i32,
        y as i32,
        BANNER_STYLE,
    );
}

fn draw_os(buf: &mut CellBuffer, rect: Rect, os_id: &str) {
    draw_box(buf, rect, " OS ", Color::DarkCyan);
    let glyph = select(os_id);
    let Some((x, y)) = placement(glyph, rect) else {
        return;
    };
    let style = Style::new(Color::DarkCyan, PANEL_BG).bold();
    for (offset, line) in glyph.lines.iter().enumerate() {
        print_at(buf, line, x as i32, y as i32 + offset as i32, style);
    }
}

fn draw_system(buf: &mut CellBuffer, rect: Rect, snapshot: &Snapshot, palette: &Palette) {
    draw_box(buf, rect, " SYSTEM ", Color::DarkGreen);
    let Rect { x, y, width, .. } = rect;
    let cyan = Style::new(Color::DarkCyan, PANEL_BG);

    print_centered(buf, &snapshot.time, x, y + 2, width, Style::new(palette.time, PANEL_BG));
    print_centered(buf, &snapshot.uptime, x, y + 3, width, Style::new(palette.uptime, PANEL_BG));
    draw_separator(buf, x + 2, y + 4, width.saturating_sub(4), Color::DarkGreen);
    print_centered(buf, &format!("Host: {}", snapshot.host), x, y + 5, width, cyan);
    print_centered(buf, &format!("System: {}", snapshot.kernel), x, y + 6, width, cyan);
}

fn draw_resources(buf: &mut CellBuffer, rect: Rect, snapshot: &Snapshot, palette: &Palette) {
    draw_box(buf, rect, " RESOURCES ", Color::DarkYellow);
    let Rect { x, y, width, .. } = rect;

    let memory = &snapshot.memory;
    let memory_style = Style::new(usage_level(memory.percent).color(), PANEL_BG);
    print_centered(buf, "Memory:", x, y + 2, width, LABEL_STYLE);
    print_centered(buf, &format!("{}%", memory.percent), x, y + 3, width, memory_style);
    print_centered(buf, &memory.text, x, y + 4, width, Style::new(palette.memory, PANEL_BG));

    let cpu = &snapshot.cpu;
    let cpu_style = Style::new(usage_level(cpu.percent).color(), PANEL_BG);
    print_centered(buf, "CPU:", x, y + 6, width, LABEL_STYLE);
    print_centered(buf, &format!("{}%", cpu.percent), x, y + 7, width, cpu_style);
}

fn draw_connectivity(buf: &mut CellBuffer, rect: Rect, snapshot: &Snapshot, palette: &Palette) {
    draw_box(buf, rect, " CONNECTIVITY ", Color::DarkBlue);
    let Rect { x, y, width, .. } = rect;
    let detail = Style::new(palette.network, PANEL_BG);

    let network_color = if snapshot.network.connected {
        Color::DarkGreen
    } else {
        Color::DarkRed
    };
    print_centered(buf, "Network:", x, y + 2, width, LABEL_STYLE);
    print_centered(
        buf,
        &snapshot.network.text,
        x,
        y + 3,
        width,
        Style::new(network_color, PANEL_BG),
    );
    print_centered(buf, &snapshot.ip, x, y + 5, width, detail);
    print_centered(buf, &snapshot.gateway, x, y + 6, width, detail);
    print_centered(buf, &snapshot.dns, x, y + 7, width, detail);

    let vpn_color = match snapshot.vpn {
        VpnStatus::Active => Color::DarkGreen,
        _ => palette.vpn,
    };
    print_centered(buf, "Security:", x, y + 9, width, LABEL_STYLE);
    print_centered(
        buf,
        snapshot.vpn.label(),
        x,
        y + 10,
        width,
        Style::new(vpn_color, PANEL_BG),
    );
}

fn draw_power(buf: &mut CellBuffer, rect: Rect, snapshot: &Snapshot, palette: &Palette) {
    draw_box(buf, rect, " POWER ", Color::DarkMagenta);
    let Rect { x, y, width, .. } = rect;
    let magenta = Style::new(palette.battery, PANEL_BG);

    match &snapshot.battery {
        Some(battery) => {
            let level = Style::new(battery_level(battery.percent).color(), PANEL_BG);
            print_centered(buf, "Battery:", x, y + 2, width, LABEL_STYLE);
            print_centered(buf, &format!("{}%", battery.percent), x, y + 3, width, level);
            print_centered(buf, &battery.text, x, y + 4, width, magenta);
        }
        None => {
            print_centered(buf, "AC Power Only", x, y + 2, width, magenta);
            print_centered(
                buf,
                "No battery detected",
                x,
                y + 3,
                width,
                Style::new(Color::DarkCyan, PANEL_BG),
            );
        }
    }
}

fn draw_footer(buf: &mut CellBuffer, rect: Rect, data_interval: Duration) {
    draw_box(buf, rect, "", Color::Grey);
    let hint = format!(
        "'q' Quit  *  'r' Reboot  *  's' Shutdown  *  Refreshes every {}",
        format_interval(data_interval)
    );
    print_centered(buf, &hint, rect.x, rect.y + 1, rect.width, LABEL_STYLE);
}

fn format_interval(interval: Duration) -> String {
    if interval.subsec_millis() == 0 {
        format!("{}s", interval.as_secs())
    } else {
        format!("{:.1}s", interval.as_secs_f64())
    }
}
