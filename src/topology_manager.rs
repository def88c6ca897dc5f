//! topology_manager.rs
//!
//! Control plane for per-vendor topology loads.
//!
//! - Fetches the association dumps through the feed client and builds the
//!   Topology Index (plus, for AWS, the Zone-Region Map) per vendor.
//! - On the refresh interval, rebuilds each vendor wholesale and swaps the
//!   versioned handle; results are vendor-keyed, so a load superseded by a
//!   newer one is simply ignored (last writer wins).
//! - A failed fetch leaves the previous topology in place (or none at
//!   all): filters degrade to wildcard-only, nothing crashes.

use anyhow::Result;
use std::sync::Arc;
use tokio::time::{self, Duration};
use tracing::{info, warn};

use spotfeed_rs::SpotFeedClient;

use crate::config::Config;
use crate::state::Shared;
use crate::state::topology::TopologyIndex;
use crate::state::zonemap::ZoneRegionMap;
use crate::types::{ArchiveFailure, Vendor};

/// Fetch and build one vendor's topology. The zone map exists for AWS
/// only and is always rebuilt together with the index, never patched.
pub async fn fetch_vendor_topology(
    client: &SpotFeedClient,
    vendor: Vendor,
) -> Result<(TopologyIndex, Option<ZoneRegionMap>), ArchiveFailure> {
    let index = match vendor {
        Vendor::Aws => {
            let dump = client
                .get_aws_association()
                .await
                .map_err(|_| ArchiveFailure::TopologyUnavailable(vendor))?;
            TopologyIndex::from_aws(&dump)?
        }
        Vendor::Azure => {
            let dump = client
                .get_azure_association()
                .await
                .map_err(|_| ArchiveFailure::TopologyUnavailable(vendor))?;
            TopologyIndex::from_azure(&dump)?
        }
        Vendor::Gcp => {
            let dump = client
                .get_gcp_association()
                .await
                .map_err(|_| ArchiveFailure::TopologyUnavailable(vendor))?;
            TopologyIndex::from_gcp(&dump)?
        }
    };
    let zones = vendor.has_zones().then(|| ZoneRegionMap::build(&index));
    Ok((index, zones))
}

/// Load every vendor's topology once at startup. Degraded vendors are
/// logged and left without a topology; the engine still runs for them.
pub async fn bootstrap_topologies(
    client: &SpotFeedClient,
    shared: &Shared,
    vendors: &[Vendor],
) -> Result<()> {
    for &vendor in vendors {
        match fetch_vendor_topology(client, vendor).await {
            Ok((index, zones)) => {
                let instances = index.instance_names().len();
                let regions = index.region_names().len();
                let mapped = zones.as_ref().map_or(0, |z| z.len());
                let vs = shared.vendor(vendor);
                let version = vs.install_topology(index, zones).await;
                shared.notify.notify_one();
                info!(
                    "{} topology v{}: {} instances, {} regions, {} zone mappings",
                    vendor, version, instances, regions, mapped
                );
            }
            Err(failure) => {
                warn!("{} bootstrap degraded: {}", vendor, failure);
                let vs = shared.vendor(vendor);
                vs.record_failure(failure).await;
                shared.notify.notify_one();
            }
        }
    }
    Ok(())
}

/// Main loop: rebuild every vendor's topology on the refresh interval.
pub async fn run_topology_manager(
    cfg: Config,
    client: Arc<SpotFeedClient>,
    shared: Shared,
) -> Result<()> {
    let mut interval = time::interval(Duration::from_millis(cfg.topology_refresh_ms));
    // The first tick fires immediately; bootstrap already covered it.
    interval.tick().await;

    loop {
        interval.tick().await;

        for &vendor in &cfg.vendors {
            match fetch_vendor_topology(&client, vendor).await {
                Ok((index, zones)) => {
                    let vs = shared.vendor(vendor);
                    let version = vs.install_topology(index, zones).await;
                    shared.notify.notify_one();
                    info!("{} topology refreshed to v{}", vendor, version);
                }
                Err(failure) => {
                    // Keep whatever topology we had; stale beats none.
                    warn!("{} topology refresh failed: {}", vendor, failure);
                }
            }
        }
    }
}
