use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::engine::filter::{FilterResolver, FilterSession};
use crate::engine::series::SeriesTable;
use crate::state::topology::TopologyIndex;
use crate::state::zonemap::ZoneRegionMap;
use crate::types::{ArchiveFailure, Vendor};

/// Immutable topology handle for one vendor load.
///
/// Created on a successful association fetch, replaced wholesale on the
/// next one, never mutated in place. The version lets late arrivals from
/// a superseded load be recognized and ignored.
#[derive(Debug)]
pub struct VendorTopology {
    pub version: u64,
    pub index: TopologyIndex,
    /// Present for AWS only.
    pub zones: Option<ZoneRegionMap>,
}

/// Everything rendering collaborators need for one vendor, as plain data:
/// the current filter session, the latest snapshot rows, the reconstructed
/// history table and the last failure condition.
#[derive(Debug)]
pub struct VendorState {
    pub vendor: Vendor,
    pub topology: RwLock<Option<Arc<VendorTopology>>>,
    pub session: RwLock<FilterSession>,
    pub latest: RwLock<Vec<Value>>,
    pub history: RwLock<Option<SeriesTable>>,
    pub last_failure: RwLock<Option<ArchiveFailure>>,

    next_version: AtomicU64,
    pub dirty: AtomicBool,
}

impl VendorState {
    pub fn new(vendor: Vendor) -> Self {
        let today = Utc::now().date_naive();
        Self {
            vendor,
            topology: RwLock::new(None),
            session: RwLock::new(FilterSession::initial(vendor, None, today)),
            latest: RwLock::new(Vec::new()),
            history: RwLock::new(None),
            last_failure: RwLock::new(None),
            next_version: AtomicU64::new(1),
            dirty: AtomicBool::new(true),
        }
    }

    /// Swap in a freshly built topology and re-derive the filter session
    /// against it, keeping whatever selection is still consistent.
    pub async fn install_topology(&self, index: TopologyIndex, zones: Option<ZoneRegionMap>) -> u64 {
        let version = self.next_version.fetch_add(1, Ordering::AcqRel);
        let handle = Arc::new(VendorTopology { version, index, zones });
        {
            let mut slot = self.topology.write().await;
            *slot = Some(handle.clone());
        }
        {
            let resolver = FilterResolver::new(self.vendor, Some(handle.as_ref()));
            let mut session = self.session.write().await;
            let rebuilt = resolver.rebuild(&session);
            *session = rebuilt;
        }
        self.mark_dirty();
        version
    }

    pub async fn record_failure(&self, failure: ArchiveFailure) {
        let mut slot = self.last_failure.write().await;
        *slot = Some(failure);
        self.mark_dirty();
    }

    pub async fn clear_failure(&self) {
        let mut slot = self.last_failure.write().await;
        *slot = None;
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}
