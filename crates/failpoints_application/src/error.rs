//! Application-level errors

use failpoints_domain::ValidationError;
use thiserror::Error;

/// Errors returned by registry configuration calls
///
/// Evaluation never fails; only `set`, `set_all` and `observe` return these.
#[derive(Debug, Error)]
pub enum FailpointError {
    /// The failpoint could not be created because its name is invalid
    #[error("Invalid failpoint name '{name}': {source}")]
    InvalidName {
        name: String,
        #[source]
        source: ValidationError,
    },

    /// The requested state was rejected; the failpoint kept its previous state
    #[error("Failed to set failpoint '{name}': {source}")]
    Validation {
        name: String,
        #[source]
        source: ValidationError,
    },

    /// One or more failpoints rejected a bulk update
    #[error("Failed to set {} failpoint(s)", .failures.len())]
    SetAll {
        failures: Vec<(String, ValidationError)>,
    },
}

impl FailpointError {
    /// Names of the failpoints that rejected the update
    pub fn failed_names(&self) -> Vec<&str> {
        match self {
            Self::InvalidName { name, .. } | Self::Validation { name, .. } => vec![name.as_str()],
            Self::SetAll { failures } => failures.iter().map(|(name, _)| name.as_str()).collect(),
        }
    }

    /// Flatten into `(name, error)` pairs
    pub fn into_failures(self) -> Vec<(String, ValidationError)> {
        match self {
            Self::InvalidName { name, source } | Self::Validation { name, source } => {
                vec![(name, source)]
            },
            Self::SetAll { failures } => failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message() {
        let err = FailpointError::Validation {
            name: "my_failpoint".to_string(),
            source: ValidationError::InvalidProbability(2.0),
        };
        assert_eq!(
            err.to_string(),
            "Failed to set failpoint 'my_failpoint': Probability 2 not between 0.0 and 1.0"
        );
    }

    #[test]
    fn invalid_name_error_message() {
        let err = FailpointError::InvalidName {
            name: String::new(),
            source: ValidationError::EmptyName,
        };
        assert_eq!(
            err.to_string(),
            "Invalid failpoint name '': Failpoint name must not be empty"
        );
    }

    #[test]
    fn set_all_lists_failed_names() {
        let err = FailpointError::SetAll {
            failures: vec![
                ("a".to_string(), ValidationError::InvalidMaxCount(0)),
                ("b".to_string(), ValidationError::InvalidMaxCount(0)),
            ],
        };
        assert_eq!(err.to_string(), "Failed to set 2 failpoint(s)");
        assert_eq!(err.failed_names(), vec!["a", "b"]);
    }

    #[test]
    fn into_failures_flattens_single_errors() {
        let err = FailpointError::InvalidName {
            name: " ".to_string(),
            source: ValidationError::EmptyName,
        };
        assert_eq!(
            err.into_failures(),
            vec![(" ".to_string(), ValidationError::EmptyName)]
        );
    }

    #[test]
    fn source_is_exposed() {
        use std::error::Error as _;

        let err = FailpointError::Validation {
            name: "p".to_string(),
            source: ValidationError::InvalidMaxDuration(-1),
        };
        assert!(err.source().is_some());
    }
}
