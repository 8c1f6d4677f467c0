//! Box booking service.
//!
//! Exclusive time-slot reservations on named boxes over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌─────────┐    ┌────────────┐    ┌──────────────┐
//!     ──────────────────▶│  http   │───▶│  handlers  │───▶│ BookingStore │
//!                        │ server  │    │ (request.rs│    │ (RwLock, no- │
//!     Client Response    │ + layers│◀───│ response.rs│◀───│  overlap)    │
//!     ◀──────────────────└─────────┘    └────────────┘    └──────────────┘
//!
//!     Cross-cutting: config, observability (tracing + metrics), lifecycle
//! ```

use std::path::PathBuf;

use box_booking::config::{self, ServiceConfig};
use box_booking::observability::{logging, metrics};
use box_booking::{HttpServer, Shutdown};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "box-booking")]
#[command(about = "Box booking service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };
    config::loader::apply_port_override(&mut config, std::env::var("PORT").ok().as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("box-booking v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        boxes = ?config.store.boxes,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
