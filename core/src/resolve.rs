//! DNS stage of the resolution pipeline.
//!
//! Literal addresses are reverse-resolved for a display name; everything
//! else is forward-resolved and then reverse-resolved best-effort. A
//! failed forward lookup is recorded on the target, not propagated.

use std::net::IpAddr;

use tracing::debug;

use sweepr_common::network::target::{NetworkLocation, Target};

use crate::governor::Governor;

/// Fills in `addr` and `hostname`. On failure the target is marked
/// offline/filtered and left for the unresolved partition.
pub async fn resolve(target: &mut Target, governor: &Governor) {
    if let Ok(addr) = target.initial_target.parse::<IpAddr>() {
        target.addr = Some(addr);
        let _permit = governor.acquire().await;
        target.hostname = reverse_lookup(addr).await;
        return;
    }

    let _permit = governor.acquire().await;
    match forward_lookup(&target.initial_target).await {
        Some(addr) => {
            target.addr = Some(addr);
            target.hostname = Some(
                reverse_lookup(addr)
                    .await
                    .unwrap_or_else(|| target.initial_target.clone()),
            );
        }
        None => {
            debug!(host = %target.initial_target, "hostname did not resolve");
            target.addr = None;
            target.location = NetworkLocation::Unknown;
            target.status.mark_offline_filtered();
        }
    }
}

async fn forward_lookup(host: &str) -> Option<IpAddr> {
    tokio::net::lookup_host((host, 0))
        .await
        .ok()?
        .next()
        .map(|socket_addr| socket_addr.ip())
}

async fn reverse_lookup(addr: IpAddr) -> Option<String> {
    tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&addr).ok())
        .await
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use sweepr_common::network::target::TargetStatus;

    #[tokio::test]
    async fn literal_address_resolves_without_dns() {
        let governor = Governor::new(4);
        let mut target = Target::new("127.0.0.1", Vec::new());

        resolve(&mut target, &governor).await;

        assert_eq!(target.addr, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        // Status is untouched by a successful resolution.
        assert_eq!(target.status(), TargetStatus::Unknown);
    }

    #[tokio::test]
    async fn unresolvable_hostname_is_marked_offline() {
        let governor = Governor::new(4);
        let mut target = Target::new("no-such-host.invalid", Vec::new());

        resolve(&mut target, &governor).await;

        assert_eq!(target.addr, None);
        assert_eq!(target.mac, None);
        assert_eq!(target.location, NetworkLocation::Unknown);
        assert_eq!(target.status(), TargetStatus::OfflineFiltered);
    }
}
