use crate::width::display_width;

/// A fixed multi-line piece of glyph art.
#[derive(Debug, PartialEq, Eq)]
pub struct ArtGlyph {
    pub name: &'static str,
    pub lines: &'static [&'static str],
}

impl ArtGlyph {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Widest line in display cells.
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| display_width(line))
            .max()
            .unwrap_or(0)
    }
}

pub static ALPINE: ArtGlyph = ArtGlyph {
    name: "alpine",
    lines: &[
        r"   /\ /\",
        r"  /./ \  \",
        r" /./   \  \",
        r"/./    \  \",
        r"//      \  \",
        r"         \",
    ],
};

pub static ANDROID: ArtGlyph = ArtGlyph {
    name: "android",
    lines: &[
        r"  ;,           ,;",
        r"   ';,.-----.,;'",
        r"  ,'           ',",
        r" /    O     O    \",
        r"|                 |",
        r"'-----------------'",
    ],
};

pub static ARCH: ArtGlyph = ArtGlyph {
    name: "arch",
    lines: &[
        r"       /\",
        r"      /  \",
        r"     /\   \",
        r"    /      \",
        r"   /   ,,   \",
        r"  /   |  |  -\",
        r" /_-''    ''-_\",
    ],
};

pub static ARCO: ArtGlyph = ArtGlyph {
    name: "arco",
    lines: &[
        r"      /\",
        r"     /  \",
        r"    / /\ \",
        r"   / /  \ \",
        r"  / /    \ \",
        r" / / _____\ \",
        r"/_/  `----.\_\",
    ],
};

pub static ARTIX: ArtGlyph = ArtGlyph {
    name: "artix",
    lines: &[
        r"      /\",
        r"     /  \",
        r"    /`'.,\",
        r"   /     ',",
        r"  /      ,`\",
        r" /   ,.'`.  \",
        r"/.,`'     `'.\",
    ],
};

pub static CENTOS: ArtGlyph = ArtGlyph {
    name: "centos",
    lines: &[
        r" ____^____",
        r" |\  |  /|",
        r" | \ | / |",
        r"<---- ---->",
        r" | / | \ |",
        r" |/__| __\|",
        r"     v",
    ],
};

pub static DEBIAN: ArtGlyph = ArtGlyph {
    name: "debian",
    lines: &[
        r"  _____",
        r" /  __ \",
        r"|  /    |",
        r"|  \___-",
        r"-_",
        r"  --_",
    ],
};

pub static ENDEAVOUR: ArtGlyph = ArtGlyph {
    name: "endeavouros",
    lines: &[
        r"      /\",
        r"    //  \\",
        r"   //    \ \",
        r" / //     _) )",
        r"/_/___-- __-",
        r" /____--",
    ],
};

pub static FEDORA: ArtGlyph = ArtGlyph {
    name: "fedora",
    lines: &[
        r"        ,'''''.    ",
        r"       |   ,.  |   ",
        r"       |  |  '_'   ",
        r"  ,....|  |..      ",
        r".'  ,_;|   ..'     ",
        r"|  |   |  |        ",
        r"|  ',_,'  |        ",
        r" '.     ,'         ",
        r"   '''''           ",
    ],
};

pub static FREEBSD: ArtGlyph = ArtGlyph {
    name: "freebsd",
    lines: &[
        r"/\,-'''''-,/\",
        r"\_)       (_/",
        r"|           |",
        r"|           |",
        r" ;         ;",
        r"  '-_____-'",
    ],
};

pub static GENTOO: ArtGlyph = ArtGlyph {
    name: "gentoo",
    lines: &[
        r" _-----_",
        r"(       \",
        r"\    0   \",
        r" \        )",
        r" /      _/",
        r"(     _-",
        r"\____-",
    ],
};

pub static LINUX: ArtGlyph = ArtGlyph {
    name: "linux",
    lines: &[
        r"    ___",
        r"   (.. |",
        r"   (<> |",
        r"  / __  \",
        r" ( /  \ /|",
        r"_/\ __)/_)",
        r"\/----\/",
    ],
};

pub static LINUX_MINT: ArtGlyph = ArtGlyph {
    name: "linuxmint",
    lines: &[
        r" ___________",
        r"|_          \",
        r"  | | _____ |",
        r"  | | | | | |",
        r"  | | | | | |",
        r"  | \__ ___/ |",
        r"  \_________/",
    ],
};

pub static MACOS: ArtGlyph = ArtGlyph {
    name: "macos",
    lines: &[
        r"       .:'",
        r"    _ :'_",
        r" .'`_`-'_`'.",
        r":________.-'",
        r":_______:",
        r" :_______`-;",
        r"  `._.-._.'",
    ],
};

pub static MANJARO: ArtGlyph = ArtGlyph {
    name: "manjaro",
    lines: &[
        r"||||||||| ||||",
        r"||||||||| ||||",
        r"||||      ||||",
        r"|||| |||| ||||",
        r"|||| |||| ||||",
        r"|||| |||| ||||",
        r"|||| |||| ||||",
    ],
};

pub static NIXOS: ArtGlyph = ArtGlyph {
    name: "nixos",
    lines: &[
        r"  \\  \\ //",
        r" ==\\__\\/ //",
        r"   //   \\//",
        r"==//     //==",
        r" //\\___//",
        r"// /\\  \\==",
        r"  // \\  \\",
    ],
};

pub static OPENSUSE: ArtGlyph = ArtGlyph {
    name: "opensuse",
    lines: &[
        r"  _______",
        r"__|   __ \",
        r"     / .\ \",
        r"     \__/ |",
        r"   _______|",
        r"   \_______",
        r"__________/",
    ],
};

pub static POP_OS: ArtGlyph = ArtGlyph {
    name: "pop",
    lines: &[
        r"______",
        r"\   _ \        __",
        r" \ \ \ \      / /",
        r"  \ \_\ \    / /",
        r"   \  ___\  /_/",
        r"    \ \    _",
        r"   __\_\__(_)_",
        r"  (___________)",
    ],
};

pub static SLACKWARE: ArtGlyph = ArtGlyph {
    name: "slackware",
    lines: &[
        r"   ________",
        r"  /  ______|",
        r"  | |______",
        r"  \______  \",
        r"   ______| |",
        r"| |________/",
        r"|____________",
    ],
};

pub static SOLUS: ArtGlyph = ArtGlyph {
    name: "solus",
    lines: &[
        r"     /|",
        r"    / |\",
        r"   /  | \ _",
        r"  /___|__\_\",
        r" \         /",
        r"  `-------´",
    ],
};

pub static UBUNTU: ArtGlyph = ArtGlyph {
    name: "ubuntu",
    lines: &[
        r"         _",
        r"     ---(_)",
        r" _/  ---  \",
        r"(_) |   |",
        r"  \  --- _/",
        r"     ---(_)",
    ],
};

pub static VOID: ArtGlyph = ArtGlyph {
    name: "void",
    lines: &[
        r"    _______",
        r" _ \______ -",
        r"| \  ___  \ |",
        r"| | /   \ | |",
        r"| | \___/ | |",
        r"| \______ \_|",
        r" -_______\",
    ],
};

/// Glyph used whenever no rule matches.
pub static DEFAULT_GLYPH: &ArtGlyph = &LINUX;

/// Every glyph the selector can hand out.
pub static GLYPHS: [&ArtGlyph; 22] = [
    &ALPINE,
    &ANDROID,
    &ARCH,
    &ARCO,
    &ARTIX,
    &CENTOS,
    &DEBIAN,
    &ENDEAVOUR,
    &FEDORA,
    &FREEBSD,
    &GENTOO,
    &LINUX,
    &LINUX_MINT,
    &MACOS,
    &MANJARO,
    &NIXOS,
    &OPENSUSE,
    &POP_OS,
    &SLACKWARE,
    &SOLUS,
    &UBUNTU,
    &VOID,
];
