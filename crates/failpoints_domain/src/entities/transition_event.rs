//! Activation and deactivation notifications

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a failpoint became inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeactivationReason {
    /// Reconfigured with probability 0
    Disabled,
    /// Fired `max_count` times
    MaxCountReached,
    /// Active for longer than `max_duration_ms`
    MaxDurationElapsed,
}

impl fmt::Display for DeactivationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::MaxCountReached => write!(f, "max count reached"),
            Self::MaxDurationElapsed => write!(f, "max duration elapsed"),
        }
    }
}

/// Kind of state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Transition {
    /// Configured with probability > 0
    Activated,
    /// Configured with probability 0, or a limit latched
    Deactivated(DeactivationReason),
}

/// A failpoint changed between active and inactive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Namespace of the owning registry
    pub namespace: String,
    /// Failpoint name
    pub name: String,
    /// What happened
    pub transition: Transition,
}

impl TransitionEvent {
    /// Create an activation event
    pub fn activated(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            transition: Transition::Activated,
        }
    }

    /// Create a deactivation event
    pub fn deactivated(
        namespace: impl Into<String>,
        name: impl Into<String>,
        reason: DeactivationReason,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            transition: Transition::Deactivated(reason),
        }
    }

    /// True for activation events
    #[must_use]
    pub const fn is_activation(&self) -> bool {
        matches!(self.transition, Transition::Activated)
    }
}
