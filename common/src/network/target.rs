//! # Scan Target Model
//!
//! Defines the inputs and the per-host aggregate for a scan.
//!
//! Host specifications are comma separated and can be:
//! * A single IP address or hostname.
//! * A CIDR block (e.g., `192.88.99.0/24`).
//! * A per-octet range (e.g., `192.88.99-100.1-50`).
//!
//! A [`Target`] is created once per expanded host string and enriched in
//! place by the resolution pipeline; it is owned by a single task end to
//! end. The only field concurrent port probes touch is the status, which
//! lives in an atomic [`StatusCell`].

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use pnet::util::MacAddr;

use crate::network::port::Port;
use crate::network::range;

/// Liveness classification of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TargetStatus {
    Unknown = 0,
    OfflineFiltered = 1,
    Online = 2,
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::Online => write!(f, "ONLINE"),
            TargetStatus::OfflineFiltered => write!(f, "OFFLINE / FILTERED"),
            TargetStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Where the target sits relative to the scanning machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkLocation {
    Unknown,
    Local,
    Global,
}

impl fmt::Display for NetworkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkLocation::Local => write!(f, "LOCAL"),
            NetworkLocation::Global => write!(f, "GLOBAL"),
            NetworkLocation::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Compare-and-upgrade cell for [`TargetStatus`].
///
/// Status only ever moves forward: `Unknown` may become either
/// `OfflineFiltered` or `Online`, `OfflineFiltered` may become `Online`,
/// and `Online` is absorbing. Concurrent probes of the same target all
/// write through the same cell; losers of a race simply leave the stronger
/// value in place.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

impl StatusCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(TargetStatus::Unknown as u8))
    }

    pub fn get(&self) -> TargetStatus {
        match self.0.load(Ordering::Relaxed) {
            2 => TargetStatus::Online,
            1 => TargetStatus::OfflineFiltered,
            _ => TargetStatus::Unknown,
        }
    }

    /// A positive liveness signal. Wins over any previous value.
    pub fn mark_online(&self) {
        self.0.store(TargetStatus::Online as u8, Ordering::Relaxed);
    }

    /// A best-effort negative signal: only takes effect while the status
    /// is still `Unknown`.
    pub fn mark_offline_filtered(&self) {
        let _ = self.0.compare_exchange(
            TargetStatus::Unknown as u8,
            TargetStatus::OfflineFiltered as u8,
            Ordering::Relaxed,
            Ordering::Relaxed,
        );
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

/// A network host with everything needed to conduct a port scan.
#[derive(Debug)]
pub struct Target {
    /// The host string the target was created from. This is the target's
    /// identity across the whole run.
    pub initial_target: String,

    /// Resolved display name, if any lookup produced one.
    pub hostname: Option<String>,

    /// Resolved address. `None` means resolution failed and no further
    /// enrichment or probing happens.
    pub addr: Option<IpAddr>,

    /// Hardware address, when link-layer resolution found one.
    pub mac: Option<MacAddr>,

    /// Manufacturer behind the hardware address.
    pub vendor: Option<String>,

    /// Shared liveness cell, written by the pipeline and by concurrent
    /// port probes.
    pub status: Arc<StatusCell>,

    pub location: NetworkLocation,

    /// Round-trip times collected by the liveness probe.
    pub rtts: Vec<Duration>,

    /// Ports to scan for this target.
    pub ports: Vec<Port>,
}

impl Target {
    pub fn new(initial_target: impl Into<String>, ports: Vec<Port>) -> Self {
        Self {
            initial_target: initial_target.into(),
            hostname: None,
            addr: None,
            mac: None,
            vendor: None,
            status: Arc::new(StatusCell::new()),
            location: NetworkLocation::Unknown,
            rtts: Vec::new(),
            ports,
        }
    }

    pub fn status(&self) -> TargetStatus {
        self.status.get()
    }

    /// Arithmetic mean of the collected RTTs, `None` without data.
    pub fn avg_rtt(&self) -> Option<Duration> {
        if self.rtts.is_empty() {
            return None;
        }
        let total: Duration = self.rtts.iter().sum();
        Some(total / self.rtts.len() as u32)
    }
}

/// Expands a comma separated host specification into literal host strings.
///
/// CIDR blocks and per-octet ranges expand to one string per address.
/// Anything that is neither is passed through untouched and left for DNS
/// resolution to accept or reject.
pub fn expand_host_specs(spec: &str) -> Vec<String> {
    let mut hosts = Vec::new();
    for item in spec.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if let Some(expanded) = expand_cidr(item) {
            hosts.extend(expanded);
        } else if let Some(expanded) = expand_octet_ranges(item) {
            hosts.extend(expanded);
        } else {
            hosts.push(item.to_string());
        }
    }
    hosts
}

fn expand_cidr(item: &str) -> Option<Vec<String>> {
    let (ip_str, prefix_str) = item.split_once('/')?;
    let ip: Ipv4Addr = ip_str.parse().ok()?;
    let prefix: u8 = prefix_str.parse().ok()?;
    let block = range::cidr_range(ip, prefix).ok()?;
    Some(block.to_iter().map(|ip| ip.to_string()).collect())
}

/// Expands `192.88.99-100.1-50` style specs: four dot separated segments,
/// each a single octet or an inclusive `lo-hi` octet range.
fn expand_octet_ranges(item: &str) -> Option<Vec<String>> {
    if !item.contains('-') {
        return None;
    }
    let segments: Vec<&str> = item.split('.').collect();
    if segments.len() != 4 {
        return None;
    }

    let mut octets: [Vec<u8>; 4] = [const { Vec::new() }; 4];
    for (idx, segment) in segments.iter().enumerate() {
        match segment.split_once('-') {
            Some((lo, hi)) => {
                let lo: u8 = lo.parse().ok()?;
                let hi: u8 = hi.parse().ok()?;
                if lo > hi {
                    return None;
                }
                octets[idx] = (lo..=hi).collect();
            }
            None => octets[idx] = vec![segment.parse().ok()?],
        }
    }

    let mut hosts = Vec::new();
    for &a in &octets[0] {
        for &b in &octets[1] {
            for &c in &octets[2] {
                for &d in &octets[3] {
                    hosts.push(Ipv4Addr::new(a, b, c, d).to_string());
                }
            }
        }
    }
    Some(hosts)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
