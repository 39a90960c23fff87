use std::time::Duration;

/// Connect timeout used by the multi-host scan path.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Longer connect timeout for standalone single-target scans.
pub const LEGACY_CONNECT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Runtime knobs for a scan run.
///
/// Enrichment stages (ICMP liveness, link-layer resolution, vendor lookup)
/// are independently toggleable; the port scan itself always runs for
/// resolved targets.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// TCP connect timeout per probe. Also the pause before a probe is
    /// resubmitted after descriptor exhaustion.
    pub connect_timeout: Duration,

    /// Number of ICMP echo requests per target.
    pub ping_count: usize,

    /// Overall deadline for the ICMP echo round.
    pub ping_timeout: Duration,

    /// How long to wait for an ARP reply on the owning interface.
    pub arp_timeout: Duration,

    /// Use raw ICMP sockets. Forced on Windows, where unprivileged
    /// datagram ICMP sockets are unavailable.
    pub privileged: bool,

    /// Send ICMP echo requests during target resolution.
    pub ping: bool,

    /// Resolve the link-layer address (interface match, neighbor cache,
    /// active ARP).
    pub arp: bool,

    /// Look up the hardware vendor for resolved MAC addresses.
    pub vendor_lookup: bool,

    /// Upper bound on resubmissions of a single probe under descriptor
    /// exhaustion. Past the bound the port is reported filtered.
    pub max_probe_retries: usize,

    /// Overrides the detected file-descriptor limit as the concurrency
    /// capacity.
    pub fd_limit_override: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            ping_count: 3,
            ping_timeout: Duration::from_millis(3_000),
            arp_timeout: Duration::from_millis(500),
            privileged: false,
            ping: true,
            arp: true,
            vendor_lookup: true,
            max_probe_retries: 8,
            fd_limit_override: None,
        }
    }
}
