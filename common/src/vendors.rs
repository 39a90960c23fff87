use pnet::util::MacAddr;

/// Maps a hardware address to a manufacturer name.
///
/// Implementations are pass-throughs to whatever database or service backs
/// them; `None` covers both "unknown prefix" and lookup failure.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}
