//! ecopick-server - Waste classification and pricing microservice
//!
//! Accepts waste photos, classifies them through an external generative
//! model, prices submitted waste by weight and keeps an in-memory ledger of
//! submissions.

use anyhow::Result;
use clap::Parser;
use ecopick_common::config::{resolve_api_key, ConfigSource};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecopick_server::services::SubmissionLedger;
use ecopick_server::{build_router, init_classifier, with_http_layers, AppState};

#[derive(Debug, Parser)]
#[command(name = "ecopick-server", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "ECOPICK_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// HTTP port, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Classifier API key, overrides environment and config file
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config source is logged after the subscriber exists
    let config_source = ConfigSource::locate(args.config.as_deref());
    let mut config = config_source.load()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting EcoPick server (ecopick-server) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Configuration loaded from {}", config_source);
    info!(?config, "Configuration resolved");

    let api_key = resolve_api_key(args.api_key.as_deref(), &config.classifier);
    let classifier = init_classifier(&config, api_key);
    info!(
        "Classifier mode: {}",
        if classifier.is_live() { "live" } else { "mock" }
    );

    let state = AppState::new(classifier, SubmissionLedger::new());
    let app = with_http_layers(build_router(state), &config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("ecopick-server listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
