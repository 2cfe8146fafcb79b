//! # Structured Logging Module
//!
//! Console logging in either human-readable text or JSON lines. `RUST_LOG`
//! takes precedence over the configured level when it is set.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogFormat;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
///
/// Later calls are no-ops, and an already-installed global subscriber is
/// left in place.
pub fn init_structured_logging(level: &str, format: LogFormat) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = build_filter(level);

        let layer = match format {
            LogFormat::Text => fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_current_span(true)
                .with_filter(filter)
                .boxed(),
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(level = %level, format = ?format, "Structured logging initialized");
    });
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
