//! Value Objects - Immutable, identity-less domain primitives

mod failpoint_args;
mod failpoint_name;
mod probability;

pub use failpoint_args::FailpointArgs;
pub use failpoint_name::FailpointName;
pub use probability::Probability;
