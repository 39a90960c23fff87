//! Per-target port scan engine.
//!
//! Fans one probe task out per requested port, each gated by the governor,
//! and waits for exactly as many completions as ports were submitted. A
//! probe that hits descriptor exhaustion pauses for one timeout period and
//! resubmits itself; the resubmission replaces the original completion
//! rather than adding one.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::mpsc;
use tracing::warn;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::result::{PortResult, ScanResult};
use sweepr_common::network::target::Target;

use crate::governor::Governor;
use crate::probe::{self, ProbeOutcome, Prober};

/// Runs the full connect scan for one resolved target.
pub async fn scan_target(
    target: Target,
    governor: Arc<Governor>,
    prober: Arc<dyn Prober>,
    config: &ScanConfig,
) -> ScanResult {
    let started_at = SystemTime::now();
    let Some(addr) = target.addr else {
        warn!(
            host = %target.initial_target,
            "port scan requested for unresolved target, skipping"
        );
        return ScanResult {
            target,
            ports: PortResult::new(),
            started_at,
            finished_at: SystemTime::now(),
        };
    };

    let expected = target.ports.len();
    let (tx, mut rx) = mpsc::channel(expected.max(1));

    for port in target.ports.clone() {
        let tx = tx.clone();
        let governor = governor.clone();
        let prober = prober.clone();
        let status = target.status.clone();
        let retry_pause = config.connect_timeout;
        let max_retries = config.max_probe_retries;

        tokio::spawn(async move {
            let socket_addr = SocketAddr::new(addr, port.number);
            let mut retries = 0;
            let outcome = loop {
                let permit = governor.acquire().await;
                let outcome = prober.probe(socket_addr).await;
                drop(permit);

                if outcome != ProbeOutcome::Exhausted {
                    break outcome;
                }
                retries += 1;
                if retries > max_retries {
                    warn!(
                        port = port.number,
                        retries, "descriptor exhaustion persisted, reporting port filtered"
                    );
                    break ProbeOutcome::Filtered;
                }
                tokio::time::sleep(retry_pause).await;
            };

            probe::apply_liveness_signal(outcome, &status);
            let _ = tx.send((port, outcome)).await;
        });
    }
    drop(tx);

    let mut ports = PortResult::new();
    for _ in 0..expected {
        let Some((port, outcome)) = rx.recv().await else {
            break;
        };
        match outcome {
            ProbeOutcome::Open => ports.open.push(port),
            ProbeOutcome::Closed => ports.closed.push(port),
            ProbeOutcome::Filtered | ProbeOutcome::Exhausted => ports.filtered.push(port),
        }
    }

    ScanResult {
        target,
        ports,
        started_at,
        finished_at: SystemTime::now(),
    }
}
