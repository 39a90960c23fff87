//! Link-layer frame construction and parsing.
//!
//! Only what the engine's active ARP fallback needs: building a broadcast
//! ARP request and pulling the sender's hardware address out of a reply.

pub mod arp;
pub mod ethernet;
