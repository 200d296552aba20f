//! Probability value object
//!
//! Represents the fraction of eligible evaluations that fire (0.0-1.0).
//!
//! # Examples
//!
//! ```
//! use failpoints_domain::value_objects::Probability;
//!
//! let p = Probability::new(0.25).expect("valid probability");
//! assert!((p.value() - 0.25).abs() < f64::EPSILON);
//!
//! assert!(Probability::new(1.5).is_err());
//! assert!(Probability::new(f64::NAN).is_err());
//! ```

use serde::Serialize;
use std::fmt;

use crate::errors::ValidationError;

/// Firing probability, always within [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Probability(f64);

impl Probability {
    /// Never fires
    pub const NEVER: Self = Self(0.0);

    /// Always fires
    pub const ALWAYS: Self = Self(1.0);

    /// Create a new validated probability
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidProbability` if the value is NaN
    /// or outside of [0.0, 1.0].
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidProbability(value))
        }
    }

    /// Get the probability as an f64
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// True when the probability is exactly 0.0
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_never(self) -> bool {
        self.0 == 0.0
    }

    /// True when the probability is exactly 1.0
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_always(self) -> bool {
        self.0 == 1.0
    }

    /// Whether a uniform sample in [0, 1) falls inside this probability
    ///
    /// The boundaries never consult the sample: 0.0 never admits and 1.0
    /// always admits.
    #[must_use]
    pub fn admits(self, sample: f64) -> bool {
        if self.is_never() {
            return false;
        }
        self.is_always() || sample <= self.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}
