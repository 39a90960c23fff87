use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::datalink::MacAddr;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket};

use crate::ethernet::{self, ARP_LEN, ETH_HDR_LEN, MIN_ETH_FRAME_NO_FCS};

/// Builds a broadcast ARP who-has frame for `target_addr`.
pub fn request_frame(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    ethernet::make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;
    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_sender_proto_addr(src_addr);
    arp.set_target_proto_addr(target_addr);
    Ok(Vec::from(buffer))
}

/// Extracts the sender hardware address from an ARP reply sent by
/// `expected_sender`. Anything else on the wire yields `None`.
pub fn reply_from(bytes: &[u8], expected_sender: Ipv4Addr) -> Option<MacAddr> {
    let eth = EthernetPacket::new(bytes)?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }
    let arp = ArpPacket::new(eth.payload())?;
    if arp.get_operation() != ArpOperations::Reply {
        return None;
    }
    if arp.get_sender_proto_addr() != expected_sender {
        return None;
    }
    Some(arp.get_sender_hw_addr())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::MutableEthernetPacket;

    fn build_mock_reply(sender_mac: MacAddr, sender_ip: Ipv4Addr) -> Vec<u8> {
        let mut buffer = vec![0u8; MIN_ETH_FRAME_NO_FCS];
        {
            let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
            eth.set_destination(MacAddr::broadcast());
            eth.set_source(sender_mac);
            eth.set_ethertype(EtherTypes::Arp);
        }
        {
            let mut arp =
                MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN]).unwrap();
            arp.set_hardware_type(ArpHardwareTypes::Ethernet);
            arp.set_protocol_type(EtherTypes::Ipv4);
            arp.set_hw_addr_len(6);
            arp.set_proto_addr_len(4);
            arp.set_operation(ArpOperations::Reply);
            arp.set_sender_hw_addr(sender_mac);
            arp.set_sender_proto_addr(sender_ip);
            arp.set_target_hw_addr(MacAddr::zero());
            arp.set_target_proto_addr(Ipv4Addr::new(192, 168, 1, 10));
        }
        buffer
    }

    #[test]
    fn request_frame_builds_a_broadcast_who_has() {
        let src_mac = MacAddr::new(0x01, 0x02, 0x03, 0x04, 0x05, 0x06);
        let src_addr = Ipv4Addr::new(192, 168, 1, 10);
        let dst_addr = Ipv4Addr::new(192, 168, 1, 1);

        let buffer = request_frame(src_mac, src_addr, dst_addr).expect("frame creation failed");

        let eth = EthernetPacket::new(&buffer).expect("failed to parse Ethernet frame");
        assert_eq!(eth.get_destination(), MacAddr::broadcast());
        assert_eq!(eth.get_source(), src_mac);
        assert_eq!(eth.get_ethertype(), EtherTypes::Arp);

        let arp = ArpPacket::new(eth.payload()).expect("failed to parse ARP packet");
        assert_eq!(arp.get_operation(), ArpOperations::Request);
        assert_eq!(arp.get_hardware_type(), ArpHardwareTypes::Ethernet);
        assert_eq!(arp.get_sender_hw_addr(), src_mac);
        assert_eq!(arp.get_target_hw_addr(), MacAddr::zero());
        assert_eq!(arp.get_sender_proto_addr(), src_addr);
        assert_eq!(arp.get_target_proto_addr(), dst_addr);
    }

    #[test]
    fn reply_from_extracts_the_sender_mac() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        let sender_ip = Ipv4Addr::new(192, 168, 1, 1);
        let buffer = build_mock_reply(sender_mac, sender_ip);

        assert_eq!(reply_from(&buffer, sender_ip), Some(sender_mac));
    }

    #[test]
    fn reply_from_ignores_other_senders() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        let buffer = build_mock_reply(sender_mac, Ipv4Addr::new(192, 168, 1, 1));

        assert_eq!(reply_from(&buffer, Ipv4Addr::new(192, 168, 1, 2)), None);
    }

    #[test]
    fn reply_from_ignores_requests() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        let sender_ip = Ipv4Addr::new(192, 168, 1, 1);
        let mut buffer = build_mock_reply(sender_mac, sender_ip);
        {
            let mut arp =
                MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN]).unwrap();
            arp.set_operation(ArpOperations::Request);
        }

        assert_eq!(reply_from(&buffer, sender_ip), None);
    }

    #[test]
    fn reply_from_ignores_non_arp_frames() {
        let sender_mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        let sender_ip = Ipv4Addr::new(192, 168, 1, 1);
        let mut buffer = build_mock_reply(sender_mac, sender_ip);
        {
            let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
            eth.set_ethertype(EtherTypes::Ipv4);
        }

        assert_eq!(reply_from(&buffer, sender_ip), None);
    }
}
