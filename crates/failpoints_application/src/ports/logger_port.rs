//! Logger port
//!
//! Optional collaborator that receives configuration failures. A registry
//! without a logger simply skips these calls.

#[cfg(test)]
use mockall::automock;

/// Structured metadata attached to error reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Namespace of the registry reporting the error
    pub namespace: String,
    /// Failpoint the error relates to
    pub failpoint: String,
    /// Rendered error
    pub error: String,
}

/// Port for reporting warnings and errors
#[cfg_attr(test, automock)]
pub trait FailpointLogger: Send + Sync {
    /// Report a warning
    fn warn(&self, message: &str);

    /// Report an error with metadata
    fn error(&self, message: &str, context: &ErrorContext);
}
