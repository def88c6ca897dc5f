use std::collections::HashSet;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::{self, Duration};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::engine::filter::{FilterResolver, FilterSession, validate_submission};
use crate::state::Shared;
use crate::types::{QueryCommand, SessionCommand, Vendor};

/// Session engine: applies filter edits, validates submissions and
/// forwards query work to the exec task. Runs until the command channel
/// closes.
pub async fn run_engine(
    cfg: Config,
    shared: Shared,
    mut rx: mpsc::Receiver<SessionCommand>,
    tx: mpsc::Sender<QueryCommand>,
) -> Result<()> {
    let mut active = cfg.default_vendor;
    // One latest-snapshot request per vendor until someone asks again.
    let mut latest_requested: HashSet<Vendor> = HashSet::new();
    let mut interval = time::interval(Duration::from_millis(cfg.tick_ms));

    loop {
        tokio::select! {
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    SessionCommand::SelectVendor(vendor) => {
                        active = vendor;
                        let vs = shared.vendor(vendor);
                        let topo = vs.topology.read().await.clone();
                        {
                            // Vendor switch resets the session: fresh dates,
                            // nothing selected, options from the topology.
                            let mut session = vs.session.write().await;
                            *session = FilterSession::initial(
                                vendor,
                                topo.as_deref(),
                                Utc::now().date_naive(),
                            );
                        }
                        vs.mark_dirty();
                        shared.notify.notify_one();

                        let have_rows = !vs.latest.read().await.is_empty();
                        if !have_rows && latest_requested.insert(vendor) {
                            let _ = tx.send(QueryCommand::Latest {
                                vendor,
                                request_id: Uuid::new_v4(),
                            }).await;
                        }
                    }

                    SessionCommand::Edit { vendor, edit } => {
                        let vs = shared.vendor(vendor);
                        let topo = vs.topology.read().await.clone();
                        let resolver = FilterResolver::new(vendor, topo.as_deref());
                        {
                            let mut session = vs.session.write().await;
                            let next = resolver.apply(&session, edit);
                            *session = next;
                        }
                        vs.mark_dirty();
                        shared.notify.notify_one();
                    }

                    SessionCommand::Submit { vendor } => {
                        let vs = shared.vendor(vendor);
                        let topo = vs.topology.read().await.clone();
                        let state = vs.session.read().await.state.clone();
                        match validate_submission(
                            vendor,
                            topo.as_deref(),
                            &state,
                            cfg.max_range_months,
                        ) {
                            Ok((params, range)) => {
                                let request_id = Uuid::new_v4();
                                info!(
                                    "submitting {} query {} ({} .. {})",
                                    vendor, request_id, range.start, range.end
                                );
                                let _ = tx.send(QueryCommand::History {
                                    vendor,
                                    params,
                                    range,
                                    request_id,
                                }).await;
                            }
                            Err(failure) => {
                                warn!("{} submission rejected: {}", vendor, failure);
                                vs.record_failure(failure).await;
                                shared.notify.notify_one();
                            }
                        }
                    }

                    SessionCommand::RefreshLatest { vendor } => {
                        latest_requested.insert(vendor);
                        let _ = tx.send(QueryCommand::Latest {
                            vendor,
                            request_id: Uuid::new_v4(),
                        }).await;
                    }
                }
            }

            _ = interval.tick() => {
                // Backstop: if the active vendor never got its snapshot
                // (e.g. selected before bootstrap finished), request it.
                let vs = shared.vendor(active);
                let have_rows = !vs.latest.read().await.is_empty();
                if !have_rows && latest_requested.insert(active) {
                    let _ = tx.send(QueryCommand::Latest {
                        vendor: active,
                        request_id: Uuid::new_v4(),
                    }).await;
                }
            }
        }
    }

    Ok(())
}
