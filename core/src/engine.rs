//! Multi-target orchestration.
//!
//! One task per expanded host runs the resolution pipeline and, for
//! resolved targets, the port scan. Completions fan into a channel sized
//! by the host count; the collector waits for exactly that many messages,
//! so completion order never matters and no sentinel is needed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::port::Port;
use sweepr_common::network::result::{MultiScanResult, ScanResult};
use sweepr_common::network::target::Target;

use crate::governor::Governor;
use crate::pipeline;
use crate::probe::{ConnectProber, Prober};
use crate::scan;
use crate::vendors::MacOuiRepo;

/// Called after each target finishes, with the number done so far.
pub type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

enum Completion {
    Resolved(ScanResult),
    Unresolved(Target),
}

/// Scans every host in `hosts` for `ports` and aggregates the outcome.
///
/// Hosts are already-expanded literal strings; each gets its own copy of
/// the port list. A single governor, sized from the descriptor limit
/// unless overridden, gates all blocking work across all targets.
pub async fn run_scan(
    hosts: Vec<String>,
    ports: Vec<Port>,
    config: ScanConfig,
    on_target_done: Option<ProgressCallback>,
) -> MultiScanResult {
    let governor = Arc::new(match config.fd_limit_override {
        Some(capacity) => Governor::new(capacity),
        None => Governor::from_fd_limit(),
    });
    let prober: Arc<dyn Prober> = Arc::new(ConnectProber::new(config.connect_timeout));
    let vendors = Arc::new(MacOuiRepo);
    let config = Arc::new(config);
    let callback: Option<Arc<ProgressCallback>> = on_target_done.map(Arc::new);
    let done = Arc::new(AtomicUsize::new(0));

    let expected = hosts.len();
    let (tx, mut rx) = mpsc::channel(expected.max(1));

    for host in hosts {
        let tx = tx.clone();
        let governor = governor.clone();
        let prober = prober.clone();
        let vendors = vendors.clone();
        let config = config.clone();
        let callback = callback.clone();
        let done = done.clone();
        let ports = ports.clone();

        tokio::spawn(async move {
            let target =
                pipeline::resolve_target(host, ports, &config, &governor, vendors.as_ref()).await;

            let completion = if target.addr.is_some() {
                Completion::Resolved(scan::scan_target(target, governor, prober, &config).await)
            } else {
                Completion::Unresolved(target)
            };

            if let Some(callback) = callback.as_deref() {
                callback(done.fetch_add(1, Ordering::Relaxed) + 1);
            }
            let _ = tx.send(completion).await;
        });
    }
    drop(tx);

    let mut result = MultiScanResult::default();
    for _ in 0..expected {
        match rx.recv().await {
            Some(Completion::Resolved(scan_result)) => result.resolved.push(scan_result),
            Some(Completion::Unresolved(target)) => result.unresolved.push(target),
            None => break,
        }
    }
    result
}
