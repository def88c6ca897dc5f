pub mod topology;
pub mod vendor;
pub mod zonemap;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::types::Vendor;
use vendor::VendorState;

#[derive(Clone, Debug)]
pub struct Shared {
    pub vendors: Arc<DashMap<Vendor, Arc<VendorState>>>,
    pub notify: Arc<Notify>,
}

impl Shared {
    pub fn new(vendors: &[Vendor]) -> Self {
        let map = DashMap::new();
        for &v in vendors {
            map.insert(v, Arc::new(VendorState::new(v)));
        }
        Self {
            vendors: Arc::new(map),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Fetch a vendor's state slot (insert if missing).
    pub fn vendor(&self, vendor: Vendor) -> Arc<VendorState> {
        if let Some(existing) = self.vendors.get(&vendor) {
            return existing.value().clone();
        }
        let vs = Arc::new(VendorState::new(vendor));
        self.vendors.insert(vendor, vs.clone());
        vs
    }
}
