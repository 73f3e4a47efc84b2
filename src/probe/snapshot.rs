use serde::Serialize;

/// Longest text any field may carry after collection.
pub const MAX_FIELD_LEN: usize = 255;

pub const UNKNOWN: &str = "Unknown";

/// Truncate `text` to at most [`MAX_FIELD_LEN`] characters.
pub fn bounded(text: impl Into<String>) -> String {
    let mut text = text.into();
    if let Some((idx, _)) = text.char_indices().nth(MAX_FIELD_LEN) {
        text.truncate(idx);
    }
    text
}

/// A percentage reading and the line shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gauge {
    pub percent: u8,
    pub text: String,
}

impl Gauge {
    pub fn new(percent: u8, text: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            text: bounded(text),
        }
    }

    /// Reading that could not be taken. Shows as 0%.
    pub fn unknown() -> Self {
        Self::new(0, UNKNOWN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStatus {
    pub connected: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Battery {
    pub percent: u8,
    pub status: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VpnStatus {
    Active,
    Inactive,
    Unknown,
}

impl VpnStatus {
    pub fn label(self) -> &'static str {
        match self {
            VpnStatus::Active => "VPN: Active",
            VpnStatus::Inactive => "VPN: Inactive",
            VpnStatus::Unknown => "VPN: Unknown",
        }
    }
}

/// Everything one data refresh knows about the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub time: String,
    pub uptime: String,
    pub memory: Gauge,
    pub cpu: Gauge,
    pub network: NetworkStatus,
    /// `None` when the machine has no battery.
    pub battery: Option<Battery>,
    pub vpn: VpnStatus,
    /// Lowercase OS identifier, e.g. `arch`.
    pub os_id: String,
    pub ip: String,
    pub gateway: String,
    pub dns: String,
    /// `user@hostname`.
    pub host: String,
    /// Kernel name, release and machine.
    pub kernel: String,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            time: UNKNOWN.to_string(),
            uptime: UNKNOWN.to_string(),
            memory: Gauge::unknown(),
            cpu: Gauge::new(0, "0%"),
            network: NetworkStatus {
                connected: false,
                text: "No network connection".to_string(),
            },
            battery: None,
            vpn: VpnStatus::Unknown,
            os_id: "linux".to_string(),
            ip: "IP: Unknown".to_string(),
            gateway: "Gateway: Unknown".to_string(),
            dns: "DNS: Unknown".to_string(),
            host: "Unknown@Unknown".to_string(),
            kernel: "Unknown Unknown Unknown".to_string(),
        }
    }
}
