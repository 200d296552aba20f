//! Logger port backed by `tracing`

use failpoints_application::{ErrorContext, FailpointLogger};
use tracing::{error, warn};

/// Forwards failpoint reports to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FailpointLogger for TracingLogger {
    fn warn(&self, message: &str) {
        warn!("{message}");
    }

    fn error(&self, message: &str, context: &ErrorContext) {
        error!(
            namespace = %context.namespace,
            failpoint = %context.failpoint,
            error = %context.error,
            "{message}"
        );
    }
}
