#![cfg(test)]
//! End-to-end runs of the engine against loopback sockets and
//! unresolvable names. Everything here stays on the local machine.

use std::time::Duration;

use tokio::net::TcpListener;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::port::{Port, Protocol};
use sweepr_common::network::target::{NetworkLocation, TargetStatus};
use sweepr_core::engine;

/// Engine config that touches nothing but TCP and finishes fast.
fn probe_only_config() -> ScanConfig {
    ScanConfig {
        connect_timeout: Duration::from_millis(500),
        ping: false,
        arp: false,
        vendor_lookup: false,
        ..ScanConfig::default()
    }
}

fn tcp_ports(numbers: &[u16]) -> Vec<Port> {
    numbers
        .iter()
        .map(|&n| Port::from_registry(n, Protocol::Tcp))
        .collect()
}

#[tokio::test]
async fn listening_port_is_classified_open_and_proves_liveness() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open_port = listener.local_addr().unwrap().port();

    let result = engine::run_scan(
        vec!["127.0.0.1".to_string()],
        tcp_ports(&[open_port]),
        probe_only_config(),
        None,
    )
    .await;

    assert_eq!(result.resolved.len(), 1);
    assert!(result.unresolved.is_empty());

    let scan = &result.resolved[0];
    assert_eq!(scan.ports.open.len(), 1);
    assert_eq!(scan.ports.open[0].number, open_port);
    assert_eq!(scan.target.status(), TargetStatus::Online);
    assert!(scan.finished_at >= scan.started_at);
}

#[tokio::test]
async fn refused_port_is_never_open() {
    // Bind then drop to find a port with nothing listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = engine::run_scan(
        vec!["127.0.0.1".to_string()],
        tcp_ports(&[dead_port]),
        probe_only_config(),
        None,
    )
    .await;

    let scan = &result.resolved[0];
    // Loopback normally refuses outright (closed); a local firewall may
    // swallow the SYN instead (filtered). Open would be a bug either way.
    assert!(scan.ports.open.is_empty());
    assert_eq!(scan.ports.total(), 1);
}

#[tokio::test]
async fn open_and_dead_port_side_by_side() {
    let keep = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open_port = keep.local_addr().unwrap().port();
    let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_port = probe.local_addr().unwrap().port();
    drop(probe);

    let result = engine::run_scan(
        vec!["127.0.0.1".to_string()],
        tcp_ports(&[open_port, dead_port]),
        probe_only_config(),
        None,
    )
    .await;

    let scan = &result.resolved[0];
    assert_eq!(scan.ports.total(), 2);
    assert_eq!(scan.ports.open.len(), 1);
    assert_eq!(scan.ports.open[0].number, open_port);
    assert_eq!(scan.target.status(), TargetStatus::Online);
}

#[tokio::test]
async fn unresolvable_host_lands_in_the_unresolved_partition() {
    let result = engine::run_scan(
        vec!["no-such-host.invalid".to_string()],
        tcp_ports(&[80]),
        probe_only_config(),
        None,
    )
    .await;

    assert!(result.resolved.is_empty());
    assert_eq!(result.unresolved.len(), 1);

    let target = &result.unresolved[0];
    assert_eq!(target.status(), TargetStatus::OfflineFiltered);
    assert_eq!(target.addr, None);
    assert_eq!(target.mac, None);
    assert_eq!(target.location, NetworkLocation::Unknown);
}

#[tokio::test]
async fn every_host_is_accounted_for_exactly_once() {
    let hosts = vec![
        "127.0.0.1".to_string(),
        "no-such-host.invalid".to_string(),
        "also-missing.invalid".to_string(),
    ];

    let result = engine::run_scan(hosts.clone(), tcp_ports(&[9]), probe_only_config(), None).await;

    assert_eq!(result.len(), hosts.len());
    assert_eq!(result.resolved.len(), 1);
    assert_eq!(result.unresolved.len(), 2);
}

#[tokio::test]
async fn small_governor_capacity_still_completes_every_probe() {
    let hosts: Vec<String> = (1..=4).map(|i| format!("127.0.0.{i}")).collect();
    let ports: Vec<u16> = (40_000..40_050).collect();

    let config = ScanConfig {
        fd_limit_override: Some(10),
        ..probe_only_config()
    };

    let result = engine::run_scan(hosts, tcp_ports(&ports), config, None).await;

    assert_eq!(result.resolved.len(), 4);
    for scan in &result.resolved {
        assert_eq!(
            scan.ports.total(),
            50,
            "target {} lost classifications",
            scan.target.initial_target
        );
    }
}

#[tokio::test]
async fn progress_callback_fires_once_per_host() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result = engine::run_scan(
        vec!["127.0.0.1".to_string(), "no-such-host.invalid".to_string()],
        tcp_ports(&[9]),
        probe_only_config(),
        Some(Box::new(move |_done| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    )
    .await;

    assert_eq!(result.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
