//! Log output setup for hosts embedding the engine.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host. This helper installs the usual fmt subscriber with an
//! `EnvFilter` (`RUST_LOG` wins over the configured level).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),
}

/// Log output settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// One JSON object per line instead of human-readable output
    pub json_logs: bool,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            with_target: true,
        }
    }
}

/// Install a global subscriber.
///
/// Fails with [`TelemetryError::TracerInit`] when the filter directive is
/// invalid or a global subscriber is already set; callers that may run
/// twice can ignore the error.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::TracerInit(e.to_string()))?;

    let json_layer = config.json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(config.with_target)
            .with_line_number(true)
    });
    let fmt_layer = (!config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(config.with_target)
            .with_ansi(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::TracerInit(e.to_string()))?;

    tracing::debug!(
        level = %config.log_level,
        json = config.json_logs,
        "Tracing initialized"
    );
    Ok(())
}
