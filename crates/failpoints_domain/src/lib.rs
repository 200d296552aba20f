//! Domain layer for failpoints
//!
//! Contains the validated configuration of a failpoint, its serializable
//! snapshot, transition events and validation errors. Nothing in here reads
//! a clock or draws random numbers.

pub mod configuration;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use configuration::{FailpointState, TriggerConfig, TriggerSettings};
pub use entities::*;
pub use errors::ValidationError;
pub use value_objects::*;
