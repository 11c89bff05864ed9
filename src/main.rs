//! Switchyard demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ App::handle ──▶ route table ──▶ handler
//!                     (middleware)    (per-request     (leaf, controller,
//!                                      context)         group, back)
//!     Client Response
//!     ◀────────────── response ◀──── Resolution ◀──── settlement
//! ```
//!
//! Usage: `switchyard [CONFIG]`. Without a config file the defaults apply.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use switchyard::config::{load_config, AppConfig};
use switchyard::http::HttpServer;
use switchyard::lifecycle::{wait_for_signal, Shutdown};
use switchyard::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => load_config(&path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("switchyard v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        config_routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let app = Arc::new(switchyard::demo::app(&config.routes)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, app).run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
