use clap::Parser;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Concurrent TCP connect scanner with host enrichment.")]
pub struct CommandLine {
    /// Comma separated hosts: single IPs or hostnames, CIDR blocks
    /// (192.88.99.0/24) and per-octet ranges (192.88.99-100.1-50)
    pub hosts: String,

    /// Comma separated ports and ranges, e.g. "22,80,1000-1024"
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Add the N most commonly open ports to the scan list.
    /// Defaults to 250 when no --ports are given.
    #[arg(long = "most-common", value_name = "N")]
    pub most_common: Option<usize>,

    /// Only print targets confirmed as online
    #[arg(long)]
    pub online_only: bool,

    /// Additionally save the report under scans/
    #[arg(long)]
    pub file: bool,

    /// Use raw-socket ICMP (requires elevated privileges)
    #[arg(long)]
    pub privileged: bool,

    /// Skip the ICMP liveness probe
    #[arg(long)]
    pub no_ping: bool,

    /// Skip link-layer (ARP) resolution
    #[arg(long)]
    pub no_arp: bool,

    /// Skip the hardware vendor lookup
    #[arg(long)]
    pub no_vendor: bool,

    /// TCP connect timeout in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub timeout_ms: u64,

    /// Probe retry bound under descriptor exhaustion
    #[arg(long, default_value_t = 8)]
    pub retries: usize,

    /// Override the detected file-descriptor limit as the concurrency cap
    #[arg(long)]
    pub limit: Option<usize>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
