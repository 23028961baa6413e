//! Keyword Lookup Proxy
//!
//! Small HTTP relay in front of the DataForSEO ranked-keywords API.
//!
//! ```text
//!   Client                         Proxy                              DataForSEO
//!     │  POST /ranked_keywords       │                                     │
//!     │ ───────────────────────────▶ │ [bearer gate] → validate            │
//!     │                              │ ── POST [task] (basic auth) ──────▶ │
//!     │                              │ ◀───────────── {tasks: [...]} ───── │
//!     │ ◀── {domain, keywords, ..} ─ │ reshape                             │
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use keyword_lookup_proxy::config::load_config;
use keyword_lookup_proxy::lifecycle::{wait_for_signal, Shutdown};
use keyword_lookup_proxy::observability::{logging, metrics};
use keyword_lookup_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "keyword-lookup-proxy", version)]
#[command(about = "HTTP relay for DataForSEO ranked-keyword lookups", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides PORT and the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.listener.set_port(port);
    }

    logging::init_logging(config.observability.log_format);
    tracing::info!("keyword-lookup-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.endpoint_url(),
        auth_enabled = config.auth.api_key.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");
    tracing::info!("Health check: http://{}/health", local_addr);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
