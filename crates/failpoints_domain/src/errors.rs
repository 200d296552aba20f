//! Domain-level errors

use thiserror::Error;

/// Errors raised when a failpoint name or configuration is malformed
///
/// A configuration that fails validation is never applied, so the
/// target failpoint keeps whatever state it had before.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// Failpoint names must not be empty
    #[error("Failpoint name must not be empty")]
    EmptyName,

    /// Probability outside of [0.0, 1.0] or not a finite number
    #[error("Probability {0} not between 0.0 and 1.0")]
    InvalidProbability(f64),

    /// Max count was zero or negative
    #[error("Max count {0} is not an integer greater than 0")]
    InvalidMaxCount(i64),

    /// Max duration was zero or negative
    #[error("Max duration {0}ms is not a duration greater than 0ms")]
    InvalidMaxDuration(i64),

    /// Args were given but are not an object with at least one key
    #[error("Args must be an object with at least 1 key: {0}")]
    InvalidArgs(String),
}
