use std::time::SystemTime;

use crate::network::port::Port;
use crate::network::target::Target;

/// Per-target port classification, built up as probes complete.
///
/// A port lands in exactly one of the three lists.
#[derive(Debug, Default)]
pub struct PortResult {
    pub open: Vec<Port>,
    pub closed: Vec<Port>,
    pub filtered: Vec<Port>,
}

impl PortResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.open.len() + self.closed.len() + self.filtered.len()
    }
}

/// The outcome of scanning a single resolved target.
#[derive(Debug)]
pub struct ScanResult {
    pub target: Target,
    pub ports: PortResult,
    pub started_at: SystemTime,
    pub finished_at: SystemTime,
}

/// The outcome of a whole run, split by whether resolution succeeded.
///
/// Entry order within each partition is completion order and carries no
/// meaning.
#[derive(Debug, Default)]
pub struct MultiScanResult {
    pub resolved: Vec<ScanResult>,
    pub unresolved: Vec<Target>,
}

impl MultiScanResult {
    /// Total number of targets the run produced, resolved or not.
    pub fn len(&self) -> usize {
        self.resolved.len() + self.unresolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
