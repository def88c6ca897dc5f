use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use spotfeed_rs::SpotFeedClient;

use crate::engine::series::{normalize_rows, reconstruct};
use crate::state::Shared;
use crate::types::{ArchiveFailure, QueryCommand, REMOTE_ROW_CAP};

/// Query executor: runs historical and latest fetches through the feed
/// client and publishes outcomes into the vendor's state slot.
///
/// Failures never clear previously published rows or tables; they only
/// set the failure condition so collaborators can show it.
pub async fn run_exec(
    client: Arc<SpotFeedClient>,
    shared: Shared,
    mut rx: mpsc::Receiver<QueryCommand>,
) -> Result<()> {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            QueryCommand::History {
                vendor,
                params,
                range,
                request_id,
            } => {
                let vs = shared.vendor(vendor);
                match client.get_history(&params).await {
                    Ok(resp) => {
                        // The service reports application failures in-band.
                        let failure = match resp.status {
                            Some(403) => Some("Invalid Access"),
                            Some(500) => Some("Internal Server Error"),
                            _ => None,
                        };
                        if let Some(msg) = failure {
                            warn!("{} query {} refused: {}", vendor, request_id, msg);
                            vs.record_failure(ArchiveFailure::RemoteQueryFailure(
                                msg.to_string(),
                            ))
                            .await;
                            shared.notify.notify_one();
                            continue;
                        }

                        let rows = resp.data;
                        let truncated = rows.len() == REMOTE_ROW_CAP;
                        if truncated {
                            warn!(
                                "{} query {} hit the {}-row cap; result possibly truncated",
                                vendor, request_id, REMOTE_ROW_CAP
                            );
                        } else {
                            info!("{} query {} returned {} rows", vendor, request_id, rows.len());
                        }

                        let events = normalize_rows(vendor, &rows);
                        let mut table = reconstruct(&events, range);
                        table.truncated = truncated;

                        {
                            let mut slot = vs.history.write().await;
                            *slot = Some(table);
                        }
                        vs.clear_failure().await;
                        vs.mark_dirty();
                        shared.notify.notify_one();
                    }
                    Err(e) => {
                        // Previous table stays as it was.
                        warn!("{} query {} failed: {}", vendor, request_id, e);
                        vs.record_failure(ArchiveFailure::RemoteQueryFailure(e.to_string()))
                            .await;
                        shared.notify.notify_one();
                    }
                }
            }

            QueryCommand::Latest { vendor, request_id } => {
                let vs = shared.vendor(vendor);
                match client.get_latest(vendor.table_name()).await {
                    Ok(rows) => {
                        info!(
                            "{} snapshot {} loaded ({} rows)",
                            vendor,
                            request_id,
                            rows.len()
                        );
                        {
                            let mut slot = vs.latest.write().await;
                            *slot = rows;
                        }
                        vs.clear_failure().await;
                        vs.mark_dirty();
                        shared.notify.notify_one();
                    }
                    Err(e) => {
                        warn!("{} snapshot {} failed: {}", vendor, request_id, e);
                        vs.record_failure(ArchiveFailure::RemoteQueryFailure(e.to_string()))
                            .await;
                        shared.notify.notify_one();
                    }
                }
            }
        }
    }

    Ok(())
}
