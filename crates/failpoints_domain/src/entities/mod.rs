//! Domain entities - Failpoint state projections and lifecycle events

mod failpoint_snapshot;
mod transition_event;

pub use failpoint_snapshot::FailpointSnapshot;
pub use transition_event::{DeactivationReason, Transition, TransitionEvent};
