//! Locale-aware redirect gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id / trace / timeout layers
//!                         │
//!                         ▼
//!                 ┌──────────────────┐   match   ┌───────────────┐
//!                 │  static redirect │──────────▶│ 301/302 + Loc │
//!                 └────────┬─────────┘           └───────────────┘
//!                          │ continue
//!                          ▼
//!                 ┌──────────────────┐  mismatch ┌───────────────┐
//!                 │ language redirect│──────────▶│ 302 + Location│
//!                 └────────┬─────────┘           └───────────────┘
//!                          │ continue
//!                          ▼
//!                 ┌──────────────────┐
//!                 │ upstream forward │──────────▶ CMS application
//!                 └──────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use locale_gateway::config::{log_warnings, read_config, watcher::ConfigWatcher, GatewayConfig};
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::{signals::wait_for_shutdown_signal, Shutdown};
use locale_gateway::observability::{logging::init_logging, metrics::init_metrics};

#[derive(Parser)]
#[command(name = "locale-gateway")]
#[command(about = "Static and locale-based redirects in front of a CMS", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Do not reload the configuration file when it changes.
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (config, warnings) = match &args.config {
        Some(path) => read_config(path)?,
        None => (GatewayConfig::default(), Vec::new()),
    };

    init_logging(&config.observability);
    log_warnings(&warnings);

    tracing::info!("locale-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        sites = config.sites.len(),
        static_rules = config.static_redirects.rules.len(),
        language_redirect = config.language_redirect.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher must outlive the server.
    let (_watcher, config_updates) = match args.config.as_deref().filter(|_| !args.no_watch) {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
