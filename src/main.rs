//! Offline Cache - An offline-first asset cache controller
//!
//! Maintains a generation-tagged store of upstream responses, warmed through
//! a precache message channel and served through request interception.

mod api;
mod cache;
mod config;
mod controller;
mod error;
mod models;
mod net;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use controller::{CacheController, Event};
use net::HttpNetwork;

/// Main entry point for the offline cache controller.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the upstream fetch client
/// 4. Install the current cache generation (fixed precache list; fatal on failure)
/// 5. Activate: purge stale generations, claim clients
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "offline_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Offline Cache Controller");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: generation={}, max_entries={}, upstream={}, port={}",
        config.generation_tag, config.max_entries, config.upstream_origin, config.server_port
    );

    // Build the upstream fetch client
    let network = HttpNetwork::new(&config.upstream_origin)
        .expect("Failed to build upstream fetch client");
    let controller = CacheController::new(config.clone(), Arc::new(network));

    // Install must fully complete before activation begins; a failed fixed
    // precache list blocks activation entirely
    if let Err(e) = controller.dispatch(Event::Install).await {
        error!("Install failed: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = controller.dispatch(Event::Activate).await {
        error!("Activation failed: {}", e);
        std::process::exit(1);
    }

    // Create router with all endpoints
    let state = AppState::new(controller);
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Controller listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Controller shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
