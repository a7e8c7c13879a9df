//! Item Catalog - A small catalog service over a single JSON document
//!
//! Serves CRUD endpoints for items and a memoized stats endpoint.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use item_catalog::{api::create_router, spawn_watch_task, AppState, Config};

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the store and stats cache, creating the document if asked to
/// 4. Start the document watch task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Item Catalog Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: data_path={}, port={}, stats_ttl={}s, empty_stats_policy={:?}, watch={}",
        config.data_path.display(),
        config.server_port,
        config.stats_ttl,
        config.empty_stats_policy,
        config.watch_data_file
    );

    let state = AppState::from_config(&config);
    if config.create_if_missing
        && state
            .store
            .ensure_document()
            .await
            .context("Failed to create data file")?
    {
        info!("Created empty data file at {}", config.data_path.display());
    }

    let watch_handle = if config.watch_data_file {
        match spawn_watch_task(config.data_path.clone(), state.stats.clone()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Data file watcher unavailable, relying on TTL and write-path invalidation: {}", e);
                None
            }
        }
    } else {
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(watch_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the watch task and allows graceful shutdown.
async fn shutdown_signal(watch_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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

    if let Some(handle) = watch_handle {
        handle.abort();
        warn!("Watch task aborted");
    }
}
