use crate::common::setup_aws_topology;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use spotgrid::config::Config;
use spotgrid::engine::task::run_engine;
use spotgrid::state::Shared;
use spotgrid::types::{ArchiveFailure, FilterEdit, QueryCommand, SessionCommand, Vendor};

#[tokio::test]
async fn test_submit_flows_through_to_the_exec_channel() {
    let cfg = Config::default();
    let shared = Shared::new(&cfg.vendors);
    let topo = setup_aws_topology();
    shared
        .vendor(Vendor::Aws)
        .install_topology(topo.index, topo.zones)
        .await;

    let (query_tx, mut query_rx) = mpsc::channel(16);
    let (session_tx, session_rx) = mpsc::channel(16);
    let engine = tokio::spawn(run_engine(cfg, shared.clone(), session_rx, query_tx));

    session_tx
        .send(SessionCommand::SelectVendor(Vendor::Aws))
        .await
        .unwrap();

    // The vendor has no snapshot yet, so the first thing out is its load.
    let cmd = timeout(Duration::from_secs(2), query_rx.recv())
        .await
        .expect("engine should emit a command")
        .expect("channel open");
    match cmd {
        QueryCommand::Latest { vendor, .. } => assert_eq!(vendor, Vendor::Aws),
        other => panic!("expected Latest, got {:?}", other),
    }

    for edit in [
        FilterEdit::Instance(Some("m5.large".to_string())),
        FilterEdit::Region(Some("us-east-1".to_string())),
        FilterEdit::Zone(Some("use1-az1".to_string())),
    ] {
        session_tx
            .send(SessionCommand::Edit {
                vendor: Vendor::Aws,
                edit,
            })
            .await
            .unwrap();
    }
    session_tx
        .send(SessionCommand::Submit {
            vendor: Vendor::Aws,
        })
        .await
        .unwrap();

    let cmd = timeout(Duration::from_secs(2), query_rx.recv())
        .await
        .expect("engine should emit the query")
        .expect("channel open");
    match cmd {
        QueryCommand::History {
            vendor,
            params,
            range,
            ..
        } => {
            assert_eq!(vendor, Vendor::Aws);
            assert_eq!(params.table_name, "aws");
            assert_eq!(params.instance_type, "m5.large");
            assert_eq!(params.region, "us-east-1");
            assert_eq!(params.az.as_deref(), Some("use1-az1"));
            assert!(range.start <= range.end);
        }
        other => panic!("expected History, got {:?}", other),
    }

    drop(session_tx);
    engine.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_invalid_submission_is_rejected_before_any_query() {
    let cfg = Config::default();
    let shared = Shared::new(&cfg.vendors);
    // No topology installed: degraded mode, nothing selected.

    let (query_tx, mut query_rx) = mpsc::channel(16);
    let (session_tx, session_rx) = mpsc::channel(16);
    let engine = tokio::spawn(run_engine(cfg, shared.clone(), session_rx, query_tx));

    session_tx
        .send(SessionCommand::Submit {
            vendor: Vendor::Aws,
        })
        .await
        .unwrap();

    let vs = shared.vendor(Vendor::Aws);
    let mut failure = None;
    for _ in 0..200 {
        if let Some(f) = vs.last_failure.read().await.clone() {
            failure = Some(f);
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }
    match failure {
        Some(ArchiveFailure::InvalidFilterSubmission(_)) => {}
        other => panic!("expected InvalidFilterSubmission, got {:?}", other),
    }

    drop(session_tx);
    engine.await.unwrap().unwrap();

    // The engine's housekeeping may have asked for a snapshot, but no
    // historical query can have gone out.
    while let Ok(cmd) = query_rx.try_recv() {
        if let QueryCommand::History { .. } = cmd {
            panic!("rejected submission still produced a query");
        }
    }
}
