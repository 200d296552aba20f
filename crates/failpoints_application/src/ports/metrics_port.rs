//! Metrics sink port

#[cfg(test)]
use mockall::automock;

/// Counter names emitted by the registry
pub mod metric_names {
    /// A `set`/`set_all` call was rejected by validation
    pub const ERROR_SET_STATE: &str = "failpoints_error_set_state";
    /// A failpoint could not be created on first reference
    pub const ERROR_LAZY_CREATE: &str = "failpoints_error_lazy_create_failpoint";
}

/// Port for counting internal error categories
#[cfg_attr(test, automock)]
pub trait MetricsSink: Send + Sync {
    /// Increment the named counter by one
    fn increment(&self, counter: &str);
}
