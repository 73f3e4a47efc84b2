//! Host fact collection.
//!
//! The render core only sees the structured [`Snapshot`]. Parsing lives in
//! pure functions over file or command output so it can be tested without the
//! host it describes; [`SystemProbe`] wires those parsers to the live system.

mod parse;
mod snapshot;
mod system;

pub use parse::{
    CpuTimes, cpu_usage, format_network, format_uptime, parse_battery, parse_cpu_times,
    parse_default_gateway, parse_meminfo, parse_nameserver, parse_os_id, parse_route_src,
    parse_uptime, parse_vpn,
};
pub use snapshot::{
    Battery, Gauge, MAX_FIELD_LEN, NetworkStatus, Snapshot, UNKNOWN, VpnStatus, bounded,
};
pub use system::{FactSource, SystemProbe};
