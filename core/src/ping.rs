//! ICMP liveness probe.
//!
//! Sends a short burst of echo requests and records every round trip that
//! comes back. At least one reply confirms the target online. Failure to
//! even construct the probe (no raw-socket privilege, unsupported
//! platform) is logged and leaves the RTT list empty; the scan continues.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::Context;
use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use tracing::warn;

use sweepr_common::config::ScanConfig;
use sweepr_common::network::target::Target;

use crate::governor::Governor;

const ECHO_PAYLOAD: [u8; 56] = [0; 56];

pub async fn ping_target(target: &mut Target, config: &ScanConfig, governor: &Governor) {
    let Some(addr) = target.addr else {
        return;
    };

    let _permit = governor.acquire().await;
    match echo_round(addr, config).await {
        Ok(rtts) => {
            if !rtts.is_empty() {
                target.status.mark_online();
            }
            target.rtts = rtts;
        }
        Err(err) => {
            warn!(host = %target.initial_target, "liveness probe unavailable: {err:#}");
            target.rtts = Vec::new();
        }
    }
}

async fn echo_round(addr: IpAddr, config: &ScanConfig) -> anyhow::Result<Vec<Duration>> {
    let client = build_client(addr, config.privileged)?;
    let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
    pinger.timeout(config.ping_timeout);

    let mut rtts = Vec::new();
    let round = async {
        for seq in 0..config.ping_count {
            match pinger.ping(PingSequence(seq as u16), &ECHO_PAYLOAD).await {
                Ok((_reply, rtt)) => rtts.push(rtt),
                Err(_) => {}
            }
        }
    };
    // The per-echo timeout above bounds each exchange; this bounds the
    // whole round.
    let _ = tokio::time::timeout(config.ping_timeout, round).await;

    Ok(rtts)
}

fn build_client(addr: IpAddr, privileged: bool) -> anyhow::Result<Client> {
    let kind = if addr.is_ipv4() { ICMP::V4 } else { ICMP::V6 };
    // Unprivileged datagram ICMP sockets do not exist on Windows; raw
    // sockets are forced there.
    let privileged = privileged || cfg!(windows);
    let sock_type = if privileged {
        socket2::Type::RAW
    } else {
        socket2::Type::DGRAM
    };
    let config = Config::builder()
        .kind(kind)
        .sock_type_hint(sock_type)
        .build();
    Client::new(&config).context("creating ICMP client")
}
