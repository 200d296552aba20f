//! Metrics port backed by the `metrics` facade
//!
//! Counters land in whatever recorder the process installed (Prometheus
//! exporter, statsd, ...). Without a recorder the increments are no-ops.

use failpoints_application::MetricsSink;
use metrics::Label;

/// Increments `metrics` counters, tagging each with fixed labels
#[derive(Debug, Clone, Default)]
pub struct MetricsCrateSink {
    labels: Vec<Label>,
}

impl MetricsCrateSink {
    /// Create a sink without labels
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a label to every counter increment
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label::new(key.into(), value.into()));
        self
    }

    /// Labels attached to every increment
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl MetricsSink for MetricsCrateSink {
    fn increment(&self, counter: &str) {
        metrics::counter!(counter.to_string(), self.labels.clone()).increment(1);
    }
}
