//! MediaVault API server binary entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediavault_api::config::ServerConfig;
use mediavault_api::router::build_app_router;
use mediavault_api::state::AppState;
use mediavault_db::Store;

/// How often the background sweep deletes expired session tokens.
const TTL_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediavault_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Persistence ---
    let store = Store::new();
    let _sweep = store.start_ttl_sweep(TTL_SWEEP_PERIOD);
    tracing::info!("Persistence store ready, TTL sweep running");

    // --- App state and router ---
    let state = AppState::new(store, config.clone());
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST/PORT must form a valid socket address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "MediaVault API listening");

    axum::serve(listener, app).await.expect("Server error");
}
