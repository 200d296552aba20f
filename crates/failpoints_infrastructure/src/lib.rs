//! Infrastructure layer - adapters and bootstrapping for failpoints
//!
//! Implements the logger, metrics and observer ports on top of `tracing`
//! and `metrics`, loads failpoint presets with `config`, and installs the
//! tracing subscriber.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use self::config::{ConfigError, FailpointsConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_tracing};
