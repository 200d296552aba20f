//! Transition observer port
//!
//! Observers are called synchronously whenever a failpoint becomes active
//! or inactive. They run after the failpoint's lock is released, so an
//! observer may call back into the registry.

use failpoints_domain::TransitionEvent;
#[cfg(test)]
use mockall::automock;

/// Port for subscribing to activation/deactivation events
#[cfg_attr(test, automock)]
pub trait TransitionObserver: Send + Sync {
    /// Handle a transition event
    fn on_transition(&self, event: &TransitionEvent);
}

impl<F> TransitionObserver for F
where
    F: Fn(&TransitionEvent) + Send + Sync,
{
    fn on_transition(&self, event: &TransitionEvent) {
        self(event);
    }
}
