//! Tracing subscriber setup
//!
//! Console logging through `tracing-subscriber`, filtered by `RUST_LOG` when
//! set and by the configured filter otherwise.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "failpoints_application=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "failpoints_application=info,failpoints_infrastructure=info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Telemetry initialization errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.log_filter`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(filter = %config.log_filter, json = config.json, "Tracing initialized");
    Ok(())
}
