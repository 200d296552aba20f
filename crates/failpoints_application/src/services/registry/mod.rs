//! Failpoint registry
//!
//! Owns the failpoints of one namespace, creating them lazily on first
//! reference. The registry only answers "should this fire?" and hands back
//! configured args; callers run their own failure-simulating code.
//!
//! # Example
//!
//! ```
//! use failpoints_application::Registry;
//!
//! let registry = Registry::unregistered();
//! registry.set("db_write", true).unwrap();
//!
//! assert!(registry.should_fail("db_write"));
//! assert!(!registry.should_fail("never_configured"));
//! ```

mod inline;

use std::{collections::HashMap, fmt, sync::Arc};

use failpoints_domain::{
    FailpointArgs, FailpointName, FailpointSnapshot, FailpointState, ValidationError,
};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::TriggerPoint;
use crate::{
    error::FailpointError,
    ports::{
        Clock, ErrorContext, FailpointLogger, MetricsSink, RandomSource, SystemClock,
        ThreadRandom, TransitionObserver, metric_names,
    },
};

/// Prefix of namespaces generated for unregistered registries
pub const UNREGISTERED_PREFIX: &str = "Failpoints-";

/// Collection of failpoints sharing a namespace
pub struct Registry {
    namespace: Arc<str>,
    points: RwLock<HashMap<FailpointName, Arc<TriggerPoint>>>,
    observers: RwLock<Vec<Arc<dyn TransitionObserver>>>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    logger: Option<Arc<dyn FailpointLogger>>,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("namespace", &self.namespace)
            .field("failpoints", &self.points.read().len())
            .field("has_logger", &self.logger.is_some())
            .field("has_metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Create a registry using the system clock and thread RNG
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Arc::from(namespace.into()),
            points: RwLock::new(HashMap::new()),
            observers: RwLock::new(Vec::new()),
            clock: Arc::new(SystemClock),
            random: Arc::new(ThreadRandom),
            logger: None,
            metrics: None,
        }
    }

    /// Create a registry with a generated, unique namespace
    ///
    /// Used for isolated instances (tests, embedded components) that should
    /// never be shared through a namespace table.
    #[must_use]
    pub fn unregistered() -> Self {
        Self::new(format!("{UNREGISTERED_PREFIX}{}", Uuid::new_v4()))
    }

    /// Use a custom clock for failpoints created from now on
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom random source for failpoints created from now on
    #[must_use]
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Report configuration failures to a logger
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn FailpointLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Count configuration failures in a metrics sink
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Namespace of this registry
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Names of all known failpoints, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.points.read().keys().map(ToString::to_string).collect();
        names.sort();
        names
    }

    /// Number of known failpoints
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.read().len()
    }

    /// True when no failpoint has been referenced yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.read().is_empty()
    }

    /// Set a failpoint's state, creating the failpoint if needed
    ///
    /// Failures are reported to the logger and metrics sink and returned.
    /// A rejected state leaves the failpoint as it was.
    pub fn set(
        &self,
        name: &str,
        state: impl Into<FailpointState>,
    ) -> Result<(), FailpointError> {
        let state = state.into();
        let point = self.get_or_create(name)?;
        point.configure(&state).map_err(|source| {
            self.report(
                metric_names::ERROR_SET_STATE,
                "Failed to set failpoint state",
                name,
                &source,
            );
            FailpointError::Validation {
                name: name.to_string(),
                source,
            }
        })
    }

    /// Apply the same state to every known failpoint
    ///
    /// Only failpoints referenced so far are affected. A failure on one
    /// failpoint does not stop the others from being updated; every failure
    /// is reported and collected into the result.
    pub fn set_all(&self, state: impl Into<FailpointState>) -> Result<(), FailpointError> {
        let state = state.into();
        let points: Vec<Arc<TriggerPoint>> = self.points.read().values().cloned().collect();
        if points.is_empty() {
            if let Some(logger) = &self.logger {
                logger.warn(&format!(
                    "set_all on namespace '{}' had no effect: no failpoints referenced yet",
                    self.namespace
                ));
            }
            return Ok(());
        }

        let mut failures = Vec::new();
        for point in points {
            if let Err(source) = point.configure(&state) {
                let name = point.name().to_string();
                self.report(
                    metric_names::ERROR_SET_STATE,
                    "Failed to set failpoint state",
                    &name,
                    &source,
                );
                failures.push((name, source));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            failures.sort_by(|a, b| a.0.cmp(&b.0));
            Err(FailpointError::SetAll { failures })
        }
    }

    /// Snapshot of a failpoint, or `None` for unknown names
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FailpointSnapshot> {
        self.lookup(name).map(|point| point.snapshot())
    }

    /// Args of a failpoint
    ///
    /// - `None` for unknown names
    /// - an empty payload for known failpoints without args
    /// - the configured args otherwise
    #[must_use]
    pub fn get_args(&self, name: &str) -> Option<Arc<FailpointArgs>> {
        self.lookup(name).map(|point| point.args())
    }

    /// Whether the named failpoint fires; unknown names never fire
    #[must_use]
    pub fn should_fail(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|point| point.evaluate())
    }

    /// Whether the named failpoint fires, subject to a predicate over its args
    ///
    /// The predicate is skipped for unknown and limit-latched failpoints, and
    /// runs before the random draw, so a rejection never uses up a firing.
    pub fn should_fail_conditionally<P>(&self, name: &str, predicate: P) -> bool
    where
        P: FnOnce(&FailpointArgs) -> bool,
    {
        self.fire_conditionally(name, predicate).is_some()
    }

    /// Subscribe to transitions of one failpoint, creating it if needed
    pub fn observe(
        &self,
        name: &str,
        observer: Arc<dyn TransitionObserver>,
    ) -> Result<(), FailpointError> {
        self.get_or_create(name)?.subscribe(observer);
        Ok(())
    }

    /// Subscribe to transitions of every current and future failpoint
    pub fn observe_all(&self, observer: Arc<dyn TransitionObserver>) {
        // Holding the map lock keeps new failpoints from missing or doubling the observer
        let points = self.points.read();
        self.observers.write().push(Arc::clone(&observer));
        for point in points.values() {
            point.subscribe(Arc::clone(&observer));
        }
    }

    /// Evaluate and return the firing failpoint's args
    fn fire(&self, name: &str) -> Option<Arc<FailpointArgs>> {
        self.lookup(name)?.fire()
    }

    fn fire_conditionally<P>(&self, name: &str, predicate: P) -> Option<Arc<FailpointArgs>>
    where
        P: FnOnce(&FailpointArgs) -> bool,
    {
        let point = self.lookup(name)?;
        let pending = point.pending_args()?;
        if !predicate(pending.args()) {
            return None;
        }
        point.fire_pending(&pending)
    }

    fn lookup(&self, name: &str) -> Option<Arc<TriggerPoint>> {
        self.points.read().get(name).cloned()
    }

    fn get_or_create(&self, name: &str) -> Result<Arc<TriggerPoint>, FailpointError> {
        if let Some(point) = self.lookup(name) {
            return Ok(point);
        }

        let validated = FailpointName::new(name).map_err(|source| {
            self.report(
                metric_names::ERROR_LAZY_CREATE,
                "Failed to lazily create failpoint",
                name,
                &source,
            );
            FailpointError::InvalidName {
                name: name.to_string(),
                source,
            }
        })?;

        let mut points = self.points.write();
        let point = points.entry(validated).or_insert_with_key(|name| {
            debug!(namespace = %self.namespace, failpoint = %name, "Creating failpoint");
            let point = TriggerPoint::new(
                Arc::clone(&self.namespace),
                name.clone(),
                Arc::clone(&self.clock),
                Arc::clone(&self.random),
            );
            for observer in self.observers.read().iter() {
                point.subscribe(Arc::clone(observer));
            }
            Arc::new(point)
        });
        Ok(Arc::clone(point))
    }

    fn report(&self, counter: &str, message: &str, name: &str, error: &ValidationError) {
        if let Some(logger) = &self.logger {
            logger.error(
                message,
                &ErrorContext {
                    namespace: self.namespace.to_string(),
                    failpoint: name.to_string(),
                    error: error.to_string(),
                },
            );
        }
        if let Some(metrics) = &self.metrics {
            metrics.increment(counter);
        }
    }
}
