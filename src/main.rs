//! vanish: disposable-message web service.
//!
//! ```text
//!  Client ──▶ listener ──▶ request id / timeout / body limit
//!                               │
//!                               ▼
//!                          Dispatcher ──▶ /static/*  ──▶ assets dir
//!                               │
//!                               ├──▶ route table ──▶ logged handler
//!                               └──▶ no match    ──▶ logged 404
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vanish::config::load_config;
use vanish::observability::{logging, metrics};
use vanish::{routes, Error, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "vanish")]
#[command(about = "Disposable-message web service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config).map_err(Error::from)?;
    logging::init_logging(&config.observability);

    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.server.bind_address,
        assets_dir = %config.app.assets_dir.display(),
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr).map_err(Error::from)?;
    }

    let table = routes::app_route_table().map_err(Error::from)?;
    tracing::info!(routes = table.len(), "Route table built");

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(Error::from)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        shutdown.trigger();
    });

    let server = HttpServer::new(config, table, routes::not_found_handler());
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
