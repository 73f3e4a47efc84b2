use crate::geometry::Rect;

use super::glyphs::{
    ALPINE, ANDROID, ARCH, ARCO, ARTIX, ArtGlyph, CENTOS, DEBIAN, DEFAULT_GLYPH, ENDEAVOUR,
    FEDORA, FREEBSD, GENTOO, LINUX_MINT, MACOS, MANJARO, NIXOS, OPENSUSE, POP_OS, SLACKWARE,
    SOLUS, UBUNTU, VOID,
};

/// How a rule compares against an OS identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact(&'static str),
    Contains(&'static str),
}

impl MatchRule {
    pub fn matches(&self, os_id: &str) -> bool {
        match self {
            MatchRule::Exact(key) => os_id == *key,
            MatchRule::Contains(fragment) => os_id.contains(fragment),
        }
    }
}

/// Lookup rules, tried top to bottom. The substring rules for the multi-variant
/// families sit right after their exact rule.
pub static RULES: [(MatchRule, &ArtGlyph); 23] = [
    (MatchRule::Exact("alpine"), &ALPINE),
    (MatchRule::Exact("android"), &ANDROID),
    (MatchRule::Exact("arch"), &ARCH),
    (MatchRule::Exact("arco"), &ARCO),
    (MatchRule::Exact("artix"), &ARTIX),
    (MatchRule::Exact("centos"), &CENTOS),
    (MatchRule::Exact("debian"), &DEBIAN),
    (MatchRule::Exact("endeavouros"), &ENDEAVOUR),
    (MatchRule::Exact("fedora"), &FEDORA),
    (MatchRule::Exact("freebsd"), &FREEBSD),
    (MatchRule::Exact("gentoo"), &GENTOO),
    (MatchRule::Exact("linuxmint"), &LINUX_MINT),
    (MatchRule::Contains("mint"), &LINUX_MINT),
    (MatchRule::Exact("darwin"), &MACOS),
    (MatchRule::Exact("manjaro"), &MANJARO),
    (MatchRule::Exact("nixos"), &NIXOS),
    (MatchRule::Exact("opensuse"), &OPENSUSE),
    (MatchRule::Exact("pop"), &POP_OS),
    (MatchRule::Contains("pop"), &POP_OS),
    (MatchRule::Exact("slackware"), &SLACKWARE),
    (MatchRule::Exact("solus"), &SOLUS),
    (MatchRule::Exact("ubuntu"), &UBUNTU),
    (MatchRule::Exact("void"), &VOID),
];

/// Glyph for an OS identifier. Never fails: unknown ids get the default.
pub fn select(os_id: &str) -> &'static ArtGlyph {
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(os_id))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_GLYPH)
}

/// Top-left cell for drawing `glyph` centred inside the border of `region`.
///
/// Returns `None` when the glyph is taller or wider than the region's
/// interior; art is never clipped or wrapped. Odd remainders leave the glyph
/// nearer the top-left.
pub fn placement(glyph: &ArtGlyph, region: Rect) -> Option<(u16, u16)> {
    let inner = region.inner();
    let (art_w, art_h) = (glyph.width(), glyph.height());

    if inner.is_empty() || art_h > inner.height as usize || art_w > inner.width as usize {
        return None;
    }

    let x = inner.x + ((inner.width as usize - art_w) / 2) as u16;
    let y = inner.y + ((inner.height as usize - art_h) / 2) as u16;

    let max_x = inner.right().saturating_sub(art_w as u16);
    let max_y = inner.bottom().saturating_sub(art_h as u16);
    Some((x.clamp(inner.x, max_x), y.clamp(inner.y, max_y)))
}
