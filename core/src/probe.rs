//! Single TCP connect probe and its outcome taxonomy.
//!
//! Classification works off the structured error the OS hands back, never
//! off rendered message text: refusal and timeout are the signals the scan
//! exists to observe, descriptor exhaustion is a local condition that
//! triggers a retry, and anything else fails open to "filtered".

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;

use sweepr_common::network::target::StatusCell;

/// What a single connect attempt said about a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Open,
    Closed,
    Filtered,
    /// Not a port classification: the local process ran out of
    /// descriptors and the probe must be resubmitted.
    Exhausted,
}

/// The seam between the scan engine and the socket layer.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: SocketAddr) -> ProbeOutcome;
}

/// Full TCP handshake prober with a fixed connect timeout.
pub struct ConnectProber {
    connect_timeout: Duration,
}

impl ConnectProber {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Prober for ConnectProber {
    async fn probe(&self, addr: SocketAddr) -> ProbeOutcome {
        match timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeOutcome::Open
            }
            Ok(Err(err)) => classify_connect_error(&err),
            Err(_elapsed) => ProbeOutcome::Filtered,
        }
    }
}

/// Maps a failed connect to an outcome. Pure function of the error.
pub fn classify_connect_error(err: &io::Error) -> ProbeOutcome {
    if is_fd_exhaustion(err) {
        return ProbeOutcome::Exhausted;
    }
    match err.kind() {
        io::ErrorKind::ConnectionRefused => ProbeOutcome::Closed,
        io::ErrorKind::TimedOut => ProbeOutcome::Filtered,
        _ => ProbeOutcome::Filtered,
    }
}

/// Applies an outcome's liveness evidence to the target's status cell.
///
/// A completed handshake or an active refusal both prove something is
/// answering; a timeout is only a weak negative and never overrides a
/// positive signal.
pub fn apply_liveness_signal(outcome: ProbeOutcome, status: &StatusCell) {
    match outcome {
        ProbeOutcome::Open | ProbeOutcome::Closed => status.mark_online(),
        ProbeOutcome::Filtered => status.mark_offline_filtered(),
        ProbeOutcome::Exhausted => {}
    }
}

#[cfg(unix)]
fn is_fd_exhaustion(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EMFILE) | Some(libc::ENFILE))
}

#[cfg(windows)]
fn is_fd_exhaustion(err: &io::Error) -> bool {
    // WSAEMFILE
    err.raw_os_error() == Some(10024)
}

#[cfg(not(any(unix, windows)))]
fn is_fd_exhaustion(_err: &io::Error) -> bool {
    false
}
