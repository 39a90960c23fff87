//! Link-layer resolution.
//!
//! For targets with a resolved address, works out whether they sit on a
//! local segment and what their hardware address is, in escalating order
//! of cost: interface self-check, OS neighbor cache, active ARP request.
//! Off-segment targets are classified Global and carry no hardware
//! address.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use pnet::datalink::{self, Channel, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;
use tracing::{info, warn};

use sweepr_common::config::ScanConfig;
use sweepr_common::network::target::{NetworkLocation, Target};
use sweepr_protocols::arp;

use crate::governor::Governor;

mod neighbors;

/// How long each blocking read on the datalink channel may stall before
/// the deadline is rechecked.
const READ_SLICE: Duration = Duration::from_millis(100);

pub async fn resolve_link_layer(target: &mut Target, config: &ScanConfig, governor: &Governor) {
    let Some(addr) = target.addr else {
        return;
    };

    // The scanning machine itself: no traffic needed.
    if let Some(iface) = find_self(addr) {
        target.location = NetworkLocation::Local;
        target.mac = iface.mac.filter(|mac| *mac != MacAddr::zero());
        return;
    }

    {
        let _permit = governor.acquire().await;
        if let Some(mac) = neighbors::cache_lookup(addr).await {
            info!(host = %target.initial_target, %mac, "hardware address found in neighbor cache");
            target.location = NetworkLocation::Local;
            target.mac = Some(mac);
            return;
        }
    }

    let Some(iface) = find_owning_interface(addr) else {
        target.location = NetworkLocation::Global;
        target.mac = None;
        return;
    };

    // On-segment even if the ARP exchange below comes up empty.
    target.location = NetworkLocation::Local;

    if !is_root::is_root() {
        warn!(
            host = %target.initial_target,
            "active ARP needs a raw datalink channel, skipping without root"
        );
        return;
    }

    let _permit = governor.acquire().await;
    match arp_request(&iface, addr, config.arp_timeout).await {
        Ok(Some(mac)) => {
            info!(host = %target.initial_target, %mac, "hardware address found via ARP request");
            target.mac = Some(mac);
            // An ARP reply is the strongest liveness evidence there is.
            target.status.mark_online();
        }
        Ok(None) => {}
        Err(err) => {
            warn!(host = %target.initial_target, "ARP request failed: {err:#}");
        }
    }
}

/// Returns the interface that carries `addr` as one of its own addresses.
fn find_self(addr: IpAddr) -> Option<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.ips.iter().any(|net| net.ip() == addr))
}

/// Returns an up, non-loopback interface whose attached subnet contains
/// `addr`.
fn find_owning_interface(addr: IpAddr) -> Option<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .filter(|iface| iface.is_up() && !iface.is_loopback() && iface.mac.is_some())
        .find(|iface| iface.ips.iter().any(|net| contains(net, addr)))
}

fn contains(net: &IpNetwork, addr: IpAddr) -> bool {
    match (net, addr) {
        (IpNetwork::V4(_), IpAddr::V4(_)) | (IpNetwork::V6(_), IpAddr::V6(_)) => {
            net.contains(addr)
        }
        _ => false,
    }
}

async fn arp_request(
    iface: &NetworkInterface,
    addr: IpAddr,
    wait: Duration,
) -> anyhow::Result<Option<MacAddr>> {
    let IpAddr::V4(target_v4) = addr else {
        bail!("active ARP resolution is IPv4-only");
    };
    let iface = iface.clone();
    tokio::task::spawn_blocking(move || blocking_arp_exchange(&iface, target_v4, wait))
        .await
        .context("ARP exchange task failed")?
}

fn blocking_arp_exchange(
    iface: &NetworkInterface,
    target: Ipv4Addr,
    wait: Duration,
) -> anyhow::Result<Option<MacAddr>> {
    let src_mac = iface.mac.context("interface has no MAC address")?;
    let src_addr = iface
        .ips
        .iter()
        .find_map(|net| match net {
            IpNetwork::V4(v4) => Some(v4.ip()),
            _ => None,
        })
        .context("interface has no IPv4 address")?;

    let mut channel_cfg = datalink::Config::default();
    channel_cfg.read_timeout = Some(READ_SLICE);
    let (mut tx, mut rx) = match datalink::channel(iface, channel_cfg)
        .context("opening datalink channel")?
    {
        Channel::Ethernet(tx, rx) => (tx, rx),
        _ => bail!("unsupported datalink channel type"),
    };

    let frame = arp::request_frame(src_mac, src_addr, target)?;
    if let Some(Err(err)) = tx.send_to(&frame, None) {
        return Err(err).context("sending ARP request");
    }

    let deadline = Instant::now() + wait;
    while Instant::now() < deadline {
        match rx.next() {
            Ok(bytes) => {
                if let Some(mac) = arp::reply_from(bytes, target)
                    && mac != MacAddr::zero()
                {
                    return Ok(Some(mac));
                }
            }
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
                ) => {}
            Err(err) => return Err(err).context("reading from datalink channel"),
        }
    }
    Ok(None)
}
