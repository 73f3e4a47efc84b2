use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Local;
use nix::ifaddrs::getifaddrs;
use nix::sys::utsname::uname;
use nix::unistd::{User, getuid};

use super::parse::{
    CpuTimes, cpu_usage, format_network, parse_battery, parse_default_gateway, parse_meminfo,
    parse_nameserver, parse_os_id, parse_route_src, parse_uptime, parse_vpn,
};
use super::snapshot::{Battery, Gauge, NetworkStatus, Snapshot, UNKNOWN, VpnStatus, bounded};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ROUTE_PROBE_TARGET: &str = "8.8.8.8";
/// Run through the shell so a missing `ip` reads as no tunnel routes.
const VPN_ROUTE_COMMAND: &str = "ip route show 2>/dev/null";

/// Anything that can produce a [`Snapshot`]. CPU counters are passed in and
/// handed back so the caller owns the only piece of state between samples.
pub trait FactSource {
    fn sample(&self, carry: CpuTimes) -> (Snapshot, CpuTimes);
}

/// Reads facts from the running Linux host.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    battery_path: PathBuf,
}

impl SystemProbe {
    pub fn new(battery_path: impl Into<PathBuf>) -> Self {
        Self {
            battery_path: battery_path.into(),
        }
    }

    fn time(&self) -> String {
        Local::now().format(TIME_FORMAT).to_string()
    }

    fn uptime(&self) -> String {
        read("/proc/uptime")
            .map(|text| parse_uptime(&text))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn memory(&self) -> Gauge {
        read("/proc/meminfo")
            .map(|text| parse_meminfo(&text))
            .unwrap_or_else(Gauge::unknown)
    }

    fn cpu(&self, carry: CpuTimes) -> (Gauge, CpuTimes) {
        match read("/proc/stat") {
            Some(stat) => cpu_usage(&stat, carry),
            None => (Gauge::unknown(), carry),
        }
    }

    fn network(&self) -> NetworkStatus {
        let Ok(addrs) = getifaddrs() else {
            return NetworkStatus {
                connected: false,
                text: UNKNOWN.to_string(),
            };
        };
        let names: Vec<String> = addrs
            .filter(|ifa| ifa.interface_name != "lo")
            .filter(|ifa| {
                ifa.address
                    .as_ref()
                    .and_then(|addr| addr.as_sockaddr_in())
                    .is_some()
            })
            .map(|ifa| ifa.interface_name)
            .collect();
        format_network(&names)
    }

    fn battery(&self) -> Option<Battery> {
        let capacity = read(self.battery_path.join("capacity"))?;
        let status = read(self.battery_path.join("status"));
        parse_battery(&capacity, status.as_deref())
    }

    fn vpn(&self) -> VpnStatus {
        vpn_status(VPN_ROUTE_COMMAND)
    }

    fn ip(&self) -> String {
        let addr = run("ip", &["route", "get", ROUTE_PROBE_TARGET])
            .and_then(|out| parse_route_src(&out));
        labelled("IP", addr)
    }

    fn gateway(&self) -> String {
        let addr = run("ip", &["route"]).and_then(|out| parse_default_gateway(&out));
        labelled("Gateway", addr)
    }

    fn dns(&self) -> String {
        let addr = read("/etc/resolv.conf").and_then(|text| parse_nameserver(&text));
        labelled("DNS", addr)
    }

    fn os_id(&self) -> String {
        read("/etc/os-release")
            .or_else(|| read("/usr/lib/os-release"))
            .map(|text| parse_os_id(&text))
            .unwrap_or_else(|| "linux".to_string())
    }

    fn host(&self) -> String {
        let user = User::from_uid(getuid())
            .ok()
            .flatten()
            .map(|user| user.name)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let hostname = read("/etc/hostname")
            .and_then(|text| text.lines().next().map(str::trim).map(str::to_string))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        bounded(format!("{user}@{hostname}"))
    }

    fn kernel(&self) -> String {
        match uname() {
            Ok(info) => bounded(format!(
                "{} {} {}",
                info.sysname().to_string_lossy(),
                info.release().to_string_lossy(),
                info.machine().to_string_lossy()
            )),
            Err(_) => "Unknown Unknown Unknown".to_string(),
        }
    }
}

impl FactSource for SystemProbe {
    fn sample(&self, carry: CpuTimes) -> (Snapshot, CpuTimes) {
        let (cpu, carry) = self.cpu(carry);
        let snapshot = Snapshot {
            time: self.time(),
            uptime: self.uptime(),
            memory: self.memory(),
            cpu,
            network: self.network(),
            battery: self.battery(),
            vpn: self.vpn(),
            os_id: self.os_id(),
            ip: self.ip(),
            gateway: self.gateway(),
            dns: self.dns(),
            host: self.host(),
            kernel: self.kernel(),
        };
        (snapshot, carry)
    }
}

fn read(path: impl AsRef<Path>) -> Option<String> {
    fs::read_to_string(path).ok()
}

fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// `Unknown` only when the shell itself cannot be started.
fn vpn_status(command: &str) -> VpnStatus {
    parse_vpn(run("sh", &["-c", command]).as_deref())
}

fn labelled(label: &str, value: Option<String>) -> String {
    bounded(format!(
        "{label}: {}",
        value.as_deref().unwrap_or(UNKNOWN)
    ))
}
