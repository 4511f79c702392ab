//! # pontd — pont daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (TOML file, env vars)
//! - Initialize tracing
//! - Construct the snapshot store and control channel adapters
//! - Construct the reconciler, seeding state from a persisted snapshot
//! - Optionally start the periodic reconciliation loop
//! - Build the axum router, bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use pont_adapter_control_telnet::TelnetControlChannel;
use pont_adapter_http_axum::state::AppState;
use pont_adapter_snapshot_file::FileSnapshotStore;
use pont_app::event_bus::StateBroadcast;
use pont_app::reconciler::Reconciler;
use pont_app::store::StateStore;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let store = Arc::new(StateStore::default());
    let channel = Arc::new(TelnetControlChannel::new(config.control.clone()));
    let snapshots = FileSnapshotStore::new(&config.snapshot.path);
    let bus = StateBroadcast::new(64);

    let reconciler = Arc::new(Reconciler::new(store, channel, snapshots, bus));
    reconciler.seed().await;

    if config.reconcile.tick_secs > 0 {
        let ticker = Arc::clone(&reconciler);
        let period = Duration::from_secs(config.reconcile.tick_secs);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                ticker.reconcile_and_broadcast().await;
            }
        });
    }

    let state = AppState::new(reconciler);
    let app = pont_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "pontd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
