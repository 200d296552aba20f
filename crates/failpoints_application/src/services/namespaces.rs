//! Namespace table
//!
//! Process-wide map from namespace to registry, so independent components
//! naming the same namespace share one set of failpoints.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

use parking_lot::RwLock;
use tracing::debug;

use super::Registry;
use crate::ports::{FailpointLogger, MetricsSink};

/// Namespace used when none is given
pub const DEFAULT_NAMESPACE: &str = "DEFAULT_NAMESPACE";

static GLOBAL: OnceLock<NamespaceTable> = OnceLock::new();

/// Get-or-create table of registries keyed by namespace
#[derive(Default)]
pub struct NamespaceTable {
    registries: RwLock<HashMap<String, Arc<Registry>>>,
    logger: Option<Arc<dyn FailpointLogger>>,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl fmt::Debug for NamespaceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut namespaces: Vec<String> = self.registries.read().keys().cloned().collect();
        namespaces.sort();
        f.debug_struct("NamespaceTable")
            .field("namespaces", &namespaces)
            .field("has_logger", &self.logger.is_some())
            .field("has_metrics", &self.metrics.is_some())
            .finish()
    }
}

impl NamespaceTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand a logger to every registry created from now on
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn FailpointLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Hand a metrics sink to every registry created from now on
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Process-wide table, created empty on first use
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Install the process-wide table
    ///
    /// Must happen before the first call to [`NamespaceTable::global`].
    ///
    /// # Errors
    ///
    /// Returns the table back if a global table already exists.
    pub fn install_global(table: Self) -> Result<&'static Self, Self> {
        GLOBAL.set(table)?;
        Ok(Self::global())
    }

    /// Registry for `namespace`, created on first request
    pub fn get_or_create(&self, namespace: &str) -> Arc<Registry> {
        if let Some(registry) = self.registries.read().get(namespace) {
            return Arc::clone(registry);
        }

        let mut registries = self.registries.write();
        let registry = registries
            .entry(namespace.to_string())
            .or_insert_with(|| {
                debug!(namespace, "Creating failpoint registry");
                Arc::new(self.decorate(Registry::new(namespace)))
            });
        Arc::clone(registry)
    }

    /// Registry for [`DEFAULT_NAMESPACE`]
    pub fn default_registry(&self) -> Arc<Registry> {
        self.get_or_create(DEFAULT_NAMESPACE)
    }

    /// Registry with a generated namespace, not stored in the table
    #[must_use]
    pub fn create_unregistered(&self) -> Registry {
        self.decorate(Registry::unregistered())
    }

    /// Namespaces currently in the table, sorted
    #[must_use]
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.registries.read().keys().cloned().collect();
        namespaces.sort();
        namespaces
    }

    fn decorate(&self, mut registry: Registry) -> Registry {
        if let Some(logger) = &self.logger {
            registry = registry.with_logger(Arc::clone(logger));
        }
        if let Some(metrics) = &self.metrics {
            registry = registry.with_metrics(Arc::clone(metrics));
        }
        registry
    }
}

/// Registry for [`DEFAULT_NAMESPACE`] in the process-wide table
pub fn default_registry() -> Arc<Registry> {
    NamespaceTable::global().default_registry()
}
