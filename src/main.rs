//! chatrelayd - line-oriented TCP chat relay.
//!
//! Every client sends a display name as its first line; after that each line
//! is either a `SVR:` control command or chat relayed to everyone else.

mod config;
mod error;
mod handlers;
mod network;
mod state;

use crate::config::{Config, validate};
use crate::network::Gateway;
use crate::state::Hub;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration; without a path the built-in defaults apply.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        listen = %config.listen.address,
        "Starting chatrelayd"
    );

    let hub = Arc::new(Hub::new(&config));

    let gateway = Gateway::bind(config.listen.address, Arc::clone(&hub))
        .await
        .map_err(|e| {
            error!(address = %config.listen.address, error = %e, "Failed to bind listener");
            e
        })?;
    let tracker = gateway.tracker();
    if let Ok(addr) = gateway.local_addr() {
        info!(%addr, "Accepting connections");
    }

    {
        let hub = Arc::clone(&hub);
        tokio::spawn(async move {
            shutdown_signal().await;
            info!("Shutdown requested");
            hub.lifecycle.shutdown();
        });
    }

    gateway.run().await?;

    // Sessions close on the same signal; give them a bounded time to finish.
    tracker.close();
    let grace = Duration::from_secs(config.timeouts.shutdown_grace);
    if tokio::time::timeout(grace, tracker.wait()).await.is_err() {
        warn!(
            remaining = tracker.len(),
            grace_secs = grace.as_secs(),
            "Sessions still open after shutdown grace period"
        );
    }

    info!("Server stopped");
    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
