//! Serializable projection of a failpoint's state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::FailpointArgs;

/// Point-in-time view of a failpoint
///
/// Serializes with the camelCase keys operators know from the JSON form
/// (`maxCount`, `setTime`, `triggerCount`, ...). Timestamps are epoch
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailpointSnapshot {
    /// Failpoint name
    pub name: String,
    /// Firing probability (0.0 to 1.0)
    pub probability: f64,
    /// Maximum number of firings, if limited
    pub max_count: Option<u64>,
    /// Maximum active duration in milliseconds, if limited
    pub max_duration_ms: Option<i64>,
    /// Configured args, if any
    pub args: Option<FailpointArgs>,
    /// When the failpoint was last set to an active configuration
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub set_time: Option<DateTime<Utc>>,
    /// Firings since `set_time`
    pub trigger_count: Option<u64>,
    /// Most recent firing
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_triggered: Option<DateTime<Utc>>,
}

impl FailpointSnapshot {
    /// Whether the failpoint is configured to fire at all
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.probability > 0.0
    }
}
