use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;
use tracing::warn;

use sweepr_common::vendors::VendorRepository;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the **Organizationally Unique Identifier**
/// database. A database that fails to load degrades every lookup to
/// `None` instead of aborting the scan.
fn oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(err) => {
                warn!("failed to load OUI database: {err}");
                None
            }
        })
        .as_ref()
}

/// Vendor lookups backed by the embedded OUI database.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        let db = oui_db()?;
        match db.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            Ok(None) => None,
            Err(err) => {
                warn!(%mac, "vendor lookup failed: {err}");
                None
            }
        }
    }
}
