//! Failpoint configuration
//!
//! `FailpointState` is the raw shape callers and config files hand to a
//! registry. It is validated into `TriggerSettings` before any failpoint
//! is touched, so a rejected configuration never leaves a partial update
//! behind.
//!
//! # Example
//!
//! ```
//! use failpoints_domain::{FailpointState, TriggerConfig};
//!
//! // Fully on / fully off shorthands
//! let on = FailpointState::from(true);
//! assert!(on.validate().unwrap().is_active());
//!
//! // Structured configuration
//! let state = FailpointState::from(TriggerConfig::with_probability(0.5).with_max_count(3));
//! let settings = state.validate().unwrap();
//! assert_eq!(settings.max_count(), Some(3));
//!
//! // Invalid values are rejected
//! assert!(FailpointState::from(TriggerConfig::with_probability(2.0)).validate().is_err());
//! ```

use std::{sync::Arc, time::Duration};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::ValidationError,
    value_objects::{FailpointArgs, Probability},
};

/// Requested state of a failpoint
///
/// Deserializes from either a boolean or a table/object, so config files can
/// say `my_point = true` as well as `my_point = { probability = 0.1 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FailpointState {
    /// `true` fires on every evaluation, `false` never fires; limits and args are cleared
    Toggle(bool),
    /// Full configuration
    Configured(TriggerConfig),
}

impl FailpointState {
    /// Validate this state into settings that can be applied to a failpoint
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found in the configuration.
    pub fn validate(&self) -> Result<TriggerSettings, ValidationError> {
        match self {
            Self::Toggle(true) => Ok(TriggerSettings::always()),
            Self::Toggle(false) => Ok(TriggerSettings::disabled()),
            Self::Configured(config) => config.validate(),
        }
    }
}

impl From<bool> for FailpointState {
    fn from(enabled: bool) -> Self {
        Self::Toggle(enabled)
    }
}

impl From<TriggerConfig> for FailpointState {
    fn from(config: TriggerConfig) -> Self {
        Self::Configured(config)
    }
}

/// Unvalidated failpoint configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Probability (0.0 to 1.0) that an eligible evaluation fires
    pub probability: f64,

    /// Fire at most this many times before going inactive
    #[serde(default, alias = "maxCount", skip_serializing_if = "Option::is_none")]
    pub max_count: Option<i64>,

    /// Stay active at most this many milliseconds after being set
    #[serde(
        default,
        alias = "maxDurationMs",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_duration_ms: Option<i64>,

    /// Payload handed to predicates and fire-handlers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl TriggerConfig {
    /// Create a configuration with the given probability and no limits
    pub const fn with_probability(probability: f64) -> Self {
        Self {
            probability,
            max_count: None,
            max_duration_ms: None,
            args: None,
        }
    }

    /// Limit the number of firings
    #[must_use]
    pub const fn with_max_count(mut self, max_count: i64) -> Self {
        self.max_count = Some(max_count);
        self
    }

    /// Limit how long the failpoint stays active
    #[must_use]
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration_ms = Some(i64::try_from(max_duration.as_millis()).unwrap_or(i64::MAX));
        self
    }

    /// Limit how long the failpoint stays active, in milliseconds
    #[must_use]
    pub const fn with_max_duration_ms(mut self, max_duration_ms: i64) -> Self {
        self.max_duration_ms = Some(max_duration_ms);
        self
    }

    /// Attach args
    #[must_use]
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }

    /// Validate into applicable settings
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, checking probability,
    /// max count, max duration and args in that order.
    pub fn validate(&self) -> Result<TriggerSettings, ValidationError> {
        let probability = Probability::new(self.probability)?;

        let max_count = self
            .max_count
            .map(|count| {
                u64::try_from(count)
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or(ValidationError::InvalidMaxCount(count))
            })
            .transpose()?;

        let max_duration = self
            .max_duration_ms
            .map(|ms| {
                if ms > 0 {
                    Ok(TimeDelta::milliseconds(ms))
                } else {
                    Err(ValidationError::InvalidMaxDuration(ms))
                }
            })
            .transpose()?;

        let args = self
            .args
            .clone()
            .map(FailpointArgs::new)
            .transpose()?
            .map(Arc::new);

        Ok(TriggerSettings {
            probability,
            max_count,
            max_duration,
            args,
        })
    }
}

/// Validated failpoint settings
///
/// Always replaces a failpoint's previous settings wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriggerSettings {
    probability: Probability,
    max_count: Option<u64>,
    max_duration: Option<TimeDelta>,
    args: Option<Arc<FailpointArgs>>,
}

impl TriggerSettings {
    /// Settings of a failpoint that never fires
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Settings of a failpoint that fires on every evaluation
    #[must_use]
    pub fn always() -> Self {
        Self {
            probability: Probability::ALWAYS,
            ..Self::default()
        }
    }

    /// Firing probability
    #[must_use]
    pub const fn probability(&self) -> Probability {
        self.probability
    }

    /// Maximum number of firings, if limited
    #[must_use]
    pub const fn max_count(&self) -> Option<u64> {
        self.max_count
    }

    /// Maximum active duration, if limited
    #[must_use]
    pub const fn max_duration(&self) -> Option<TimeDelta> {
        self.max_duration
    }

    /// Maximum active duration in milliseconds, if limited
    #[must_use]
    pub fn max_duration_ms(&self) -> Option<i64> {
        self.max_duration.map(|d| d.num_milliseconds())
    }

    /// Configured args, if any
    #[must_use]
    pub fn args(&self) -> Option<&Arc<FailpointArgs>> {
        self.args.as_ref()
    }

    /// Whether these settings make the failpoint active (probability > 0)
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.probability.is_never()
    }
}
