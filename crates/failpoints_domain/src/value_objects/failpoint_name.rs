//! Failpoint name value object

use std::{borrow::Borrow, fmt};

use serde::Serialize;

use crate::errors::ValidationError;

/// Non-empty identifier of a failpoint within a namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FailpointName(String);

impl FailpointName {
    /// Create a validated failpoint name
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for empty or whitespace-only names.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FailpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FailpointName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FailpointName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
