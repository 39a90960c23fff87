//! System-resource-aware concurrency gate.
//!
//! The scan fans out one task per host and one per port; unconstrained,
//! that would exhaust the process's file descriptors long before the
//! network becomes the bottleneck. Every blocking call site in the engine
//! (DNS lookup, TCP connect, ARP exchange, ICMP echo) therefore runs while
//! holding a permit from this gate.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

/// Capacity used when the descriptor limit cannot be determined.
pub const FALLBACK_FD_LIMIT: usize = 1024;

pub struct Governor {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl Governor {
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Builds a governor sized to the process's soft descriptor limit.
    pub fn from_fd_limit() -> Self {
        let capacity = detect_fd_limit();
        debug!(capacity, "sized concurrency gate from descriptor limit");
        Self::new(capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Blocks until a permit is available. The permit is returned to the
    /// pool when the guard drops, which covers every exit path.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        self.permits
            .clone()
            .acquire_owned()
            .await
            .expect("governor semaphore is never closed")
    }
}

#[cfg(unix)]
fn detect_fd_limit() -> usize {
    use rlimit::Resource;

    match Resource::NOFILE.get() {
        Ok((soft, _hard)) => usize::try_from(soft).unwrap_or(FALLBACK_FD_LIMIT),
        Err(_) => FALLBACK_FD_LIMIT,
    }
}

#[cfg(not(unix))]
fn detect_fd_limit() -> usize {
    FALLBACK_FD_LIMIT
}
