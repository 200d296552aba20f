//! Telemetry - tracing subscriber bootstrap

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_tracing};
