//! Application services - failpoint state machine, registry and namespaces

mod namespaces;
mod registry;
mod trigger_point;

pub use namespaces::{DEFAULT_NAMESPACE, NamespaceTable, default_registry};
pub use registry::{Registry, UNREGISTERED_PREFIX};
pub use trigger_point::{PendingArgs, TriggerPoint};
