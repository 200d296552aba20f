//! Application layer - failpoint evaluation and registries
//!
//! Contains the per-failpoint state machine, the namespace-scoped registry
//! with its inline helpers, and the port definitions through which logging,
//! metrics, time and randomness are supplied.

pub mod error;
pub mod ports;
pub mod services;

pub use error::FailpointError;
pub use ports::*;
pub use services::*;
