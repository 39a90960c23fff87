//! Per-target resolution pipeline.
//!
//! Stages run sequentially for one target: DNS resolution, then, only for
//! resolved addresses, the optional enrichment stages. Each stage takes
//! its own governor permits and releases them before the next stage
//! starts. No stage failure aborts the pipeline; fields degrade to their
//! unset defaults instead.

use sweepr_common::config::ScanConfig;
use sweepr_common::network::port::Port;
use sweepr_common::network::target::{NetworkLocation, Target};
use sweepr_common::vendors::VendorRepository;

use crate::governor::Governor;
use crate::{link, ping, resolve};

/// Builds and enriches the target for one expanded host string.
pub async fn resolve_target(
    host: String,
    ports: Vec<Port>,
    config: &ScanConfig,
    governor: &Governor,
    vendors: &dyn VendorRepository,
) -> Target {
    let mut target = Target::new(host, ports);

    resolve::resolve(&mut target, governor).await;
    if target.addr.is_none() {
        // Resolution failed: no enrichment is meaningful.
        target.mac = None;
        target.location = NetworkLocation::Unknown;
        return target;
    }

    if config.ping {
        ping::ping_target(&mut target, config, governor).await;
    }
    if config.arp {
        link::resolve_link_layer(&mut target, config, governor).await;
    }
    if config.vendor_lookup
        && let Some(mac) = target.mac
    {
        let _permit = governor.acquire().await;
        target.vendor = vendors.get_vendor(mac);
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepr_common::network::target::TargetStatus;

    struct NoVendors;

    impl VendorRepository for NoVendors {
        fn get_vendor(&self, _mac: pnet::util::MacAddr) -> Option<String> {
            None
        }
    }

    fn bare_config() -> ScanConfig {
        ScanConfig {
            ping: false,
            arp: false,
            vendor_lookup: false,
            ..ScanConfig::default()
        }
    }

    #[tokio::test]
    async fn unresolvable_host_short_circuits_the_pipeline() {
        let governor = Governor::new(4);
        let target = resolve_target(
            "no-such-host.invalid".to_string(),
            Vec::new(),
            &bare_config(),
            &governor,
            &NoVendors,
        )
        .await;

        assert_eq!(target.addr, None);
        assert_eq!(target.mac, None);
        assert_eq!(target.vendor, None);
        assert_eq!(target.location, NetworkLocation::Unknown);
        assert_eq!(target.status(), TargetStatus::OfflineFiltered);
        assert!(target.rtts.is_empty());
    }

    #[tokio::test]
    async fn literal_address_passes_resolution_with_stages_disabled() {
        let governor = Governor::new(4);
        let target = resolve_target(
            "127.0.0.1".to_string(),
            Vec::new(),
            &bare_config(),
            &governor,
            &NoVendors,
        )
        .await;

        assert!(target.addr.is_some());
        // Disabled stages leave their fields untouched.
        assert_eq!(target.mac, None);
        assert!(target.rtts.is_empty());
        assert_eq!(target.status(), TargetStatus::Unknown);
    }
}
