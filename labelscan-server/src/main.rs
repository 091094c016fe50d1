//! # Labelscan Server
//!
//! Barcode scanning service for device-label photographs.
//!
//! ## Overview
//!
//! A provisioning/inventory client uploads a label photo as base64 JSON to
//! `POST /scan`; the service decodes barcodes across twenty rotated and
//! photometrically adjusted variants of the image, classifies the payloads
//! (MAC, GPON serial, generic serial), and answers with the classified
//! barcodes plus a best-guess mapping onto named device fields.
//!
//! ## Architecture
//!
//! The server is built on Axum and delegates all scanning to
//! `labelscan-core`; it holds no state beyond configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labelscan_server::{AppState, Config, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "labelscan-server")]
#[command(about = "Barcode scanning service for device-label photographs")]
struct Cli {
    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory for transient scan payloads (defaults to the system temp dir)
    #[arg(long, env = "SCANNER_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Upper bound on a single scan, in seconds
    #[arg(long, env = "SCAN_TIMEOUT_SECS", default_value_t = 30)]
    scan_timeout_secs: u64,

    /// Largest accepted image payload, in megabytes
    #[arg(long, env = "MAX_IMAGE_MB", default_value_t = 10)]
    max_image_mb: usize,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            temp_dir: self.temp_dir.unwrap_or_else(std::env::temp_dir),
            scan_timeout: Duration::from_secs(self.scan_timeout_secs),
            max_image_bytes: self.max_image_mb * 1024 * 1024,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Quieter defaults; override via RUST_LOG.
                    "info,tower_http=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.into_config();
    let bind_addr = config.bind_addr();
    let state = AppState::new(config);

    let app = routes::create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("barcode scanning service listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
