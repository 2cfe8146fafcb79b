//! # Annotations Publisher Server
//!
//! ## Usage
//!
//! ```bash
//! annotations-publisher --config config/annotations-publisher.toml --port 8080
//!
//! ANNOTATIONS_PUBLISHER_ANNOTATIONS_PUBLISH_AUTH=user:secret annotations-publisher
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use annotations_publisher::bootstrap::build_app_state;
use annotations_publisher::config::{LogFormat, PublisherConfig};
use annotations_publisher::logging;
use annotations_publisher::web::create_app;

#[derive(Parser, Debug)]
#[command(name = "annotations-publisher")]
#[command(about = "Publishes draft annotations to the publishing pipeline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "ANNOTATIONS_PUBLISHER_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level or filter directive, e.g. `debug` or `annotations_publisher=trace`
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format: text or json
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = PublisherConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if let Some(log_format) = cli.log_format {
        config.log_format = log_format;
    }
    config.validate().context("Invalid configuration")?;

    logging::init_structured_logging(&config.log_level, config.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        system_code = %config.app_system_code,
        "Starting annotations publisher"
    );

    let state = build_app_state(&config)?;
    let app = create_app(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening for requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Annotations publisher shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
