//! Plain and colorized rendering of scan results.
//!
//! The same layout is used for the console and for saved report files;
//! `color: false` produces the escape-free variant.

use chrono::{DateTime, Local};
use colored::*;
use std::time::SystemTime;

use sweepr_common::network::port::Port;
use sweepr_common::network::result::{MultiScanResult, PortResult, ScanResult};
use sweepr_common::network::target::{Target, TargetStatus};

pub fn render_multi(result: &MultiScanResult, online_only: bool, color: bool) -> String {
    let mut out = String::new();
    out.push_str("################ MULTI SCAN RESULT ################\n\n");

    let mut printed = 0;
    for scan_result in &result.resolved {
        if online_only && scan_result.target.status() != TargetStatus::Online {
            continue;
        }
        out.push_str(&render_scan_result(scan_result, color));
        out.push_str("\n\n");
        printed += 1;
    }
    if printed == 0 {
        out.push_str("\tNONE\n\n");
    }

    if !online_only {
        out.push_str("################ UNRESOLVED #######################\n\n");
        if result.unresolved.is_empty() {
            out.push_str("\tNONE\n");
        }
        for target in &result.unresolved {
            out.push_str(&render_target(target, color));
            out.push('\n');
        }
    }
    out
}

pub fn render_scan_result(result: &ScanResult, color: bool) -> String {
    format!(
        "=============== SCAN RESULT =======================\n\
         \n\
         Scan started  @ {}\n\
         Scan finished @ {}\n\
         {}\n\
         {}\n\
         ===================================================",
        timestamp(result.started_at),
        timestamp(result.finished_at),
        render_target(&result.target, color),
        render_ports(&result.ports, color),
    )
}

pub fn render_target(target: &Target, color: bool) -> String {
    let ip = target
        .addr
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let hostname = target.hostname.as_deref().unwrap_or("N/A");
    let mac = target
        .mac
        .map(|mac| mac.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let vendor = target.vendor.as_deref().unwrap_or("N/A");
    let rtt = target
        .avg_rtt()
        .map(|avg| format!("{avg:?}"))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "~~~~~~~~~~~~~~~ TARGET INFO ~~~~~~~~~~~~~~~~~~~~~~~\n\
         Target: {} | IP: {} | Hostname: {}\n\
         Avg Ping [{} sent]: {}\n\
         Vendor: {}\n\
         MAC Address: {}\n\
         Network Location: {}\n\
         Status: {}",
        target.initial_target,
        ip,
        hostname,
        target.rtts.len(),
        rtt,
        vendor,
        mac,
        target.location,
        status_str(target.status(), color),
    )
}

fn render_ports(ports: &PortResult, color: bool) -> String {
    let mut out = String::from("*************** PORT RESULT ***********************\n");
    render_port_section(&mut out, "Open TCP Ports:", &ports.open, "[+]", color, |s| {
        s.green().bold()
    });
    render_port_section(
        &mut out,
        "Closed TCP Ports:",
        &ports.closed,
        "[-]",
        color,
        |s| s.red(),
    );
    render_port_section(
        &mut out,
        "Offline or filtered TCP Ports:",
        &ports.filtered,
        "[?]",
        color,
        |s| s.yellow(),
    );
    out.push_str("***************************************************");
    out
}

fn render_port_section(
    out: &mut String,
    heading: &str,
    ports: &[Port],
    symbol: &str,
    color: bool,
    paint: fn(ColoredString) -> ColoredString,
) {
    if ports.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for port in ports {
        let symbol = if color {
            paint(symbol.into()).to_string()
        } else {
            symbol.to_string()
        };
        match &port.description {
            Some(description) => {
                let description = description.replace('\n', " ");
                out.push_str(&format!("\t{symbol} {port} - {description}\n"));
            }
            None => out.push_str(&format!("\t{symbol} {port}\n")),
        }
    }
}

fn status_str(status: TargetStatus, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        TargetStatus::Online => status.to_string().green().bold().to_string(),
        TargetStatus::OfflineFiltered => status.to_string().red().to_string(),
        TargetStatus::Unknown => status.to_string().yellow().to_string(),
    }
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepr_common::network::port::Protocol;

    #[test]
    fn unresolved_target_renders_placeholders() {
        let target = Target::new("no-such-host.invalid", Vec::new());
        let block = render_target(&target, false);

        assert!(block.contains("IP: N/A"));
        assert!(block.contains("MAC Address: N/A"));
        assert!(block.contains("Vendor: N/A"));
        assert!(block.contains("Avg Ping [0 sent]: N/A"));
    }

    #[test]
    fn port_sections_only_appear_when_populated() {
        let mut ports = PortResult::new();
        ports.open.push(Port::from_registry(80, Protocol::Tcp));

        let block = render_ports(&ports, false);
        assert!(block.contains("Open TCP Ports:"));
        assert!(block.contains("80/tcp [http]"));
        assert!(!block.contains("Closed TCP Ports:"));
        assert!(!block.contains("Offline or filtered TCP Ports:"));
    }
}
