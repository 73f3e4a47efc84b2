use super::snapshot::{Battery, Gauge, NetworkStatus, UNKNOWN, VpnStatus, bounded};

/// Aggregate CPU counters from the previous sample. Threaded through the
/// scheduler so each reading is a delta against the one before it; the zero
/// default yields the average since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub total: u64,
}

/// Read the aggregate `cpu` line of `/proc/stat`.
pub fn parse_cpu_times(stat: &str) -> Option<CpuTimes> {
    let line = stat.lines().find(|line| line.starts_with("cpu "))?;
    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(8)
        .map(|field| field.parse().ok())
        .collect::<Option<_>>()?;
    if fields.len() < 4 {
        return None;
    }
    Some(CpuTimes {
        idle: fields[3],
        total: fields.iter().sum(),
    })
}

/// CPU usage since `prev`, plus the counters to carry into the next call.
/// An unreadable sample leaves the carried counters untouched.
pub fn cpu_usage(stat: &str, prev: CpuTimes) -> (Gauge, CpuTimes) {
    let Some(now) = parse_cpu_times(stat) else {
        return (Gauge::unknown(), prev);
    };

    let diff_total = now.total.saturating_sub(prev.total);
    let diff_idle = now.idle.saturating_sub(prev.idle);
    let gauge = if diff_total > 0 {
        let usage = 100u64.saturating_sub(diff_idle * 100 / diff_total) as u8;
        Gauge::new(usage, format!("{usage}%"))
    } else {
        Gauge::new(0, "0%")
    };
    (gauge, now)
}

/// Memory usage from `/proc/meminfo`: `"<used> MB / <total> MB (<pct>%)"`.
pub fn parse_meminfo(meminfo: &str) -> Gauge {
    let mut total = 0u64;
    let mut free = 0u64;
    let mut available = 0u64;
    let mut buffers = 0u64;
    let mut cached = 0u64;

    for line in meminfo.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<u64>() else {
            continue;
        };
        match key {
            "MemTotal:" => total = value,
            "MemFree:" => free = value,
            "MemAvailable:" => available = value,
            "Buffers:" => buffers = value,
            "Cached:" => cached = value,
            _ => {}
        }
    }

    let total_mb = total / 1024;
    if total_mb == 0 {
        return Gauge::unknown();
    }

    let available_mb = if available > 0 {
        available / 1024
    } else {
        (free + buffers + cached) / 1024
    };
    let used_mb = total_mb.saturating_sub(available_mb);
    let percent = (used_mb * 100 / total_mb) as u8;

    Gauge::new(
        percent,
        format!("{used_mb} MB / {total_mb} MB ({percent}%)"),
    )
}

/// Uptime from the first field of `/proc/uptime`.
pub fn parse_uptime(uptime: &str) -> String {
    uptime
        .split_whitespace()
        .next()
        .and_then(|secs| secs.parse::<f64>().ok())
        .map(|secs| format_uptime(secs as u64))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}

/// Battery reading from the `capacity` and `status` files of a power supply.
pub fn parse_battery(capacity: &str, status: Option<&str>) -> Option<Battery> {
    let percent = capacity.trim().parse::<u32>().ok()?.min(100) as u8;
    let status = status
        .and_then(|s| s.split_whitespace().next())
        .unwrap_or(UNKNOWN)
        .to_string();
    let text = bounded(format!("{percent}% ({status})"));
    Some(Battery {
        percent,
        status,
        text,
    })
}

pub fn format_network(interfaces: &[String]) -> NetworkStatus {
    if interfaces.is_empty() {
        NetworkStatus {
            connected: false,
            text: "No network connection".to_string(),
        }
    } else {
        NetworkStatus {
            connected: true,
            text: bounded(format!("Connected: {}", interfaces.join(", "))),
        }
    }
}

/// VPN presence from `ip route show` output; `None` means the command could
/// not be run.
pub fn parse_vpn(routes: Option<&str>) -> VpnStatus {
    match routes {
        None => VpnStatus::Unknown,
        Some(routes) => {
            let tunnel = routes
                .lines()
                .any(|line| ["tun", "tap", "vpn"].iter().any(|tag| line.contains(tag)));
            if tunnel {
                VpnStatus::Active
            } else {
                VpnStatus::Inactive
            }
        }
    }
}

/// Source address from `ip route get <addr>` output.
pub fn parse_route_src(route: &str) -> Option<String> {
    route.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        words.find(|word| *word == "src")?;
        words.next().map(str::to_string)
    })
}

/// Gateway of the first default route in `ip route` output.
pub fn parse_default_gateway(routes: &str) -> Option<String> {
    routes
        .lines()
        .find(|line| line.contains("default"))
        .and_then(|line| line.split_whitespace().nth(2))
        .map(str::to_string)
}

/// First `nameserver` entry of a resolv.conf.
pub fn parse_nameserver(resolv: &str) -> Option<String> {
    resolv.lines().find_map(|line| {
        let rest = line.strip_prefix("nameserver")?;
        let addr = rest.trim();
        (!addr.is_empty()).then(|| addr.to_string())
    })
}

/// `ID=` value of an os-release file, quotes removed. Falls back to `linux`.
pub fn parse_os_id(os_release: &str) -> String {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("ID="))
        .map(|id| id.trim().trim_matches('"').trim_matches('\''))
        .filter(|id| !id.is_empty())
        .map(bounded)
        .unwrap_or_else(|| "linux".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_A: &str = "cpu  100 0 100 800 0 0 0 0 0 0\ncpu0 50 0 50 400 0 0 0 0 0 0\n";
    const STAT_B: &str = "cpu  150 0 150 900 0 0 0 0 0 0\n";

    #[test]
    fn cpu_usage_is_a_delta_against_carried_state() {
        let (first, carry) = cpu_usage(STAT_A, CpuTimes::default());
        assert_eq!(first.percent, 20);
        assert_eq!(carry, CpuTimes { idle: 800, total: 1000 });

        let (second, carry) = cpu_usage(STAT_B, carry);
        // 200 ticks elapsed, 100 idle
        assert_eq!(second.percent, 50);
        assert_eq!(second.text, "50%");
        assert_eq!(carry.total, 1200);
    }

    #[test]
    fn cpu_usage_without_progress_reads_zero() {
        let carry = parse_cpu_times(STAT_A).unwrap();
        let (gauge, _) = cpu_usage(STAT_A, carry);
        assert_eq!(gauge, Gauge::new(0, "0%"));
    }

    #[test]
    fn unreadable_stat_keeps_carry() {
        let carry = CpuTimes { idle: 5, total: 9 };
        let (gauge, next) = cpu_usage("garbage", carry);
        assert_eq!(gauge, Gauge::unknown());
        assert_eq!(next, carry);
    }

    #[test]
    fn meminfo_prefers_available() {
        let meminfo = "MemTotal:       8388608 kB\nMemFree:         1048576 kB\nMemAvailable:    4194304 kB\n";
        let gauge = parse_meminfo(meminfo);
        assert_eq!(gauge.text, "4096 MB / 8192 MB (50%)");
        assert_eq!(gauge.percent, 50);
    }

    #[test]
    fn meminfo_falls_back_to_free_buffers_cached() {
        let meminfo = "MemTotal: 2097152 kB\nMemFree: 524288 kB\nBuffers: 262144 kB\nCached: 262144 kB\n";
        let gauge = parse_meminfo(meminfo);
        assert_eq!(gauge.text, "1024 MB / 2048 MB (50%)");
    }

    #[test]
    fn meminfo_without_total_is_unknown() {
        assert_eq!(parse_meminfo(""), Gauge::unknown());
    }

    #[test]
    fn uptime_formats_days_hours_minutes() {
        assert_eq!(parse_uptime("93784.51 12345.00\n"), "1d 2h 3m");
        assert_eq!(parse_uptime(""), "Unknown");
    }

    #[test]
    fn battery_reading() {
        let battery = parse_battery("42\n", Some("Discharging\n")).unwrap();
        assert_eq!(battery.percent, 42);
        assert_eq!(battery.text, "42% (Discharging)");
        assert_eq!(parse_battery("87", None).unwrap().text, "87% (Unknown)");
        assert!(parse_battery("n/a", None).is_none());
    }

    #[test]
    fn network_lists_interfaces() {
        let status = format_network(&["eth0".to_string(), "wlan0".to_string()]);
        assert!(status.connected);
        assert_eq!(status.text, "Connected: eth0, wlan0");
        assert!(!format_network(&[]).connected);
    }

    #[test]
    fn vpn_detects_tunnel_routes() {
        let routes = "default via 192.168.1.1 dev wlan0\n10.8.0.0/24 dev tun0 scope link\n";
        assert_eq!(parse_vpn(Some(routes)), VpnStatus::Active);
        assert_eq!(parse_vpn(Some("default via 10.0.0.1 dev eth0\n")), VpnStatus::Inactive);
        assert_eq!(parse_vpn(None), VpnStatus::Unknown);
    }

    #[test]
    fn route_fields() {
        let get = "8.8.8.8 via 192.168.1.1 dev wlan0 src 192.168.1.23 uid 1000\n    cache\n";
        assert_eq!(parse_route_src(get).as_deref(), Some("192.168.1.23"));
        let routes = "default via 192.168.1.1 dev wlan0 proto dhcp\n";
        assert_eq!(parse_default_gateway(routes).as_deref(), Some("192.168.1.1"));
        assert_eq!(parse_default_gateway(""), None);
    }

    #[test]
    fn resolv_conf_first_nameserver() {
        let resolv = "# comment\nsearch lan\nnameserver\t1.1.1.1\nnameserver 8.8.8.8\n";
        assert_eq!(parse_nameserver(resolv).as_deref(), Some("1.1.1.1"));
        assert_eq!(parse_nameserver("search lan\n"), None);
    }

    #[test]
    fn os_release_id() {
        assert_eq!(parse_os_id("NAME=\"Arch Linux\"\nID=arch\n"), "arch");
        assert_eq!(parse_os_id("ID=\"opensuse\"\n"), "opensuse");
        assert_eq!(parse_os_id("VERSION_ID=12\n"), "linux");
    }
}
