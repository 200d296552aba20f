//! Transition observer that logs every activation and deactivation

use failpoints_application::TransitionObserver;
use failpoints_domain::{Transition, TransitionEvent};
use tracing::info;

/// Logs failpoint transitions at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransitionObserver;

impl TransitionObserver for LoggingTransitionObserver {
    fn on_transition(&self, event: &TransitionEvent) {
        match event.transition {
            Transition::Activated => info!(
                namespace = %event.namespace,
                failpoint = %event.name,
                "Failpoint activated"
            ),
            Transition::Deactivated(reason) => info!(
                namespace = %event.namespace,
                failpoint = %event.name,
                %reason,
                "Failpoint deactivated"
            ),
        }
    }
}
