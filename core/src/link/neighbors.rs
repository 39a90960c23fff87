//! OS neighbor-cache lookups.
//!
//! Linux exposes the cache as `/proc/net/arp`; elsewhere the `arp`
//! utility is queried and its output parsed. All-zero entries mean the
//! kernel never completed the resolution and are treated as misses.

use std::net::IpAddr;
use std::str::FromStr;

use pnet::util::MacAddr;

/// Queries the neighbor cache for `addr` off the async runtime.
pub async fn cache_lookup(addr: IpAddr) -> Option<MacAddr> {
    tokio::task::spawn_blocking(move || lookup(addr))
        .await
        .ok()
        .flatten()
}

#[cfg(target_os = "linux")]
fn lookup(addr: IpAddr) -> Option<MacAddr> {
    let table = std::fs::read_to_string("/proc/net/arp").ok()?;
    parse_proc_net_arp(&table, addr)
}

#[cfg(not(target_os = "linux"))]
fn lookup(addr: IpAddr) -> Option<MacAddr> {
    let output = std::process::Command::new("arp")
        .arg("-an")
        .arg(addr.to_string())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_arp_command_output(&String::from_utf8_lossy(&output.stdout))
}

/// `/proc/net/arp` rows: IP, HW type, flags, HW address, mask, device.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_proc_net_arp(table: &str, addr: IpAddr) -> Option<MacAddr> {
    for line in table.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let Ok(row_addr) = fields[0].parse::<IpAddr>() else {
            continue;
        };
        if row_addr != addr {
            continue;
        }
        if let Ok(mac) = MacAddr::from_str(fields[3])
            && mac != MacAddr::zero()
        {
            return Some(mac);
        }
    }
    None
}

/// Pulls the hardware address out of `arp` output such as
/// `? (192.168.1.5) at aa:bb:cc:dd:ee:ff on en0 ifscope [ethernet]`.
#[cfg_attr(target_os = "linux", allow(dead_code))]
fn parse_arp_command_output(output: &str) -> Option<MacAddr> {
    for token in output.split_whitespace() {
        // Windows prints dash-separated addresses.
        let candidate = token.replace('-', ":");
        if let Ok(mac) = MacAddr::from_str(&candidate)
            && mac != MacAddr::zero()
        {
            return Some(mac);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const PROC_NET_ARP: &str = "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
192.168.1.7      0x1         0x0         00:00:00:00:00:00     *        eth0
";

    #[test]
    fn proc_table_yields_the_matching_entry() {
        let addr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(
            parse_proc_net_arp(PROC_NET_ARP, addr),
            Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff))
        );
    }

    #[test]
    fn proc_table_treats_zero_entries_as_misses() {
        let addr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 7));
        assert_eq!(parse_proc_net_arp(PROC_NET_ARP, addr), None);
    }

    #[test]
    fn proc_table_misses_unknown_addresses() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(parse_proc_net_arp(PROC_NET_ARP, addr), None);
    }

    #[test]
    fn arp_output_parses_bsd_style() {
        let output = "? (192.168.1.5) at aa:bb:cc:dd:ee:ff on en0 ifscope [ethernet]";
        assert_eq!(
            parse_arp_command_output(output),
            Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff))
        );
    }

    #[test]
    fn arp_output_parses_windows_style() {
        let output = "  192.168.1.5           aa-bb-cc-dd-ee-ff     dynamic";
        assert_eq!(
            parse_arp_command_output(output),
            Some(MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff))
        );
    }

    #[test]
    fn arp_output_without_entry_is_a_miss() {
        let output = "? (192.168.1.5) -- no entry";
        assert_eq!(parse_arp_command_output(output), None);
    }
}
