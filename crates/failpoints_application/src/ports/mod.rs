//! Port definitions for application layer
//!
//! Ports are the interfaces through which the registry reaches its
//! collaborators. Adapters in the infrastructure layer implement the
//! logger and metrics ports; the clock and random ports ship with system
//! defaults.

mod clock_port;
mod logger_port;
mod metrics_port;
mod random_port;
mod transition_observer;

#[cfg(test)]
pub use clock_port::MockClock;
pub use clock_port::{Clock, SystemClock};
#[cfg(test)]
pub use logger_port::MockFailpointLogger;
pub use logger_port::{ErrorContext, FailpointLogger};
#[cfg(test)]
pub use metrics_port::MockMetricsSink;
pub use metrics_port::{MetricsSink, metric_names};
#[cfg(test)]
pub use random_port::MockRandomSource;
pub use random_port::{RandomSource, ThreadRandom};
#[cfg(test)]
pub use transition_observer::MockTransitionObserver;
pub use transition_observer::TransitionObserver;
