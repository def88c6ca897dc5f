use anyhow::Result;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use dotenv::dotenv;
use std::env;
use std::sync::Arc;

use spotfeed_rs::SpotFeedClient;

use spotgrid::config::Config;
use spotgrid::state::Shared;
use spotgrid::types::SessionCommand;
use spotgrid::{engine, exec, topology_manager};

#[tokio::main]
async fn main() -> Result<()> {
    // Basic logging: set RUST_LOG=info (or debug) to see output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    dotenv().ok();

    let cfg = Config::default();

    // Feed hosts can be redirected at a staging deployment via .env.
    let client = Arc::new(SpotFeedClient::new_with_config(
        env::var("SPOTFEED_SELECTOR_URL").ok(),
        env::var("SPOTFEED_QUERY_URL").ok(),
        env::var("SPOTFEED_LATEST_URL").ok(),
    ));

    let shared = Shared::new(&cfg.vendors);

    // Bootstrap: topology (and zone map) per vendor before the engine
    // takes its first command.
    topology_manager::bootstrap_topologies(&client, &shared, &cfg.vendors).await?;

    // Query channel (engine -> exec)
    let (query_tx, query_rx) = mpsc::channel(cfg.command_buffer);

    // Session channel (collaborators -> engine)
    let (session_tx, session_rx) = mpsc::channel(cfg.command_buffer);

    // Seed the initial vendor selection so its latest snapshot loads.
    session_tx
        .send(SessionCommand::SelectVendor(cfg.default_vendor))
        .await?;

    // Topology refresh task
    {
        let cfg = cfg.clone();
        let client = client.clone();
        let shared = shared.clone();
        tokio::spawn(async move {
            let _ = topology_manager::run_topology_manager(cfg, client, shared).await;
        });
    }

    // Exec task
    {
        let client = client.clone();
        let shared = shared.clone();
        tokio::spawn(async move {
            let _ = exec::task::run_exec(client, shared, query_rx).await;
        });
    }

    // Engine runs on the main task; session_tx stays live here so the
    // command channel never closes underneath it.
    engine::task::run_engine(cfg, shared, session_rx, query_tx).await?;

    Ok(())
}
