//! Structured logging setup.
//!
//! `RUST_LOG` wins over the level passed in; output goes to stderr so stdout
//! stays clean JSON.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::suggest::types::{Result, SuggestError};

/// Install the global subscriber. Call once, early in `main`.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| SuggestError::Config(format!("invalid log level '{}': {}", level, e)))?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SuggestError::Config(format!("failed to set tracing subscriber: {}", e)))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "telemetry initialized");
    Ok(())
}
