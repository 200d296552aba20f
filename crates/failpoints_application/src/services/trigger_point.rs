//! Trigger point state machine
//!
//! A `TriggerPoint` decides, per evaluation, whether a named failpoint fires.
//!
//! # Evaluation order
//!
//! Checks run cheapest first so that exhausted points cost a single flag
//! check:
//!
//! 1. **Latch**: once a limit was hit, never fire until reconfigured
//! 2. **Max count**: fired `max_count` times already → latch
//! 3. **Max duration**: active for longer than `max_duration` → latch
//! 4. **Probability**: 0.0 never fires, 1.0 always fires, anything in
//!    between draws one uniform sample
//!
//! The whole sequence runs under the point's mutex so concurrent callers
//! can never fire past `max_count`. [`TriggerPoint::fire`] reads the args
//! under the same lock, so they always belong to the configuration that
//! fired.

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use chrono::{DateTime, Utc};
use failpoints_domain::{
    DeactivationReason, FailpointArgs, FailpointName, FailpointSnapshot, FailpointState,
    TransitionEvent, TriggerSettings, ValidationError,
};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::ports::{Clock, RandomSource, TransitionObserver};

/// Shared empty payload handed out for failpoints without args
static NO_ARGS: LazyLock<Arc<FailpointArgs>> = LazyLock::new(|| Arc::new(FailpointArgs::empty()));

/// Mutable part of a trigger point, guarded by its mutex
#[derive(Debug, Default)]
struct PointState {
    settings: TriggerSettings,
    set_time: Option<DateTime<Utc>>,
    trigger_count: Option<u64>,
    last_triggered: Option<DateTime<Utc>>,
    limit_reached: bool,
    /// Bumped on every `apply`
    generation: u64,
}

impl PointState {
    fn fire_count(&self) -> u64 {
        self.trigger_count.unwrap_or(0)
    }

    fn args(&self) -> Arc<FailpointArgs> {
        self.settings
            .args()
            .cloned()
            .unwrap_or_else(|| Arc::clone(&NO_ARGS))
    }
}

/// Args of one configuration, as handed out by [`TriggerPoint::pending_args`]
#[derive(Debug, Clone)]
pub struct PendingArgs {
    generation: u64,
    args: Arc<FailpointArgs>,
}

impl PendingArgs {
    /// The configured payload
    #[must_use]
    pub fn args(&self) -> &FailpointArgs {
        &self.args
    }
}

/// A single named failpoint
pub struct TriggerPoint {
    namespace: Arc<str>,
    name: FailpointName,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    state: Mutex<PointState>,
    observers: RwLock<Vec<Arc<dyn TransitionObserver>>>,
}

impl fmt::Debug for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerPoint")
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("state", &*self.state.lock())
            .field("observers", &self.observers.read().len())
            .finish_non_exhaustive()
    }
}

impl TriggerPoint {
    /// Create an inactive trigger point
    pub fn new(
        namespace: Arc<str>,
        name: FailpointName,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            namespace,
            name,
            clock,
            random,
            state: Mutex::new(PointState::default()),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Name of this failpoint
    #[must_use]
    pub const fn name(&self) -> &FailpointName {
        &self.name
    }

    /// Namespace of the registry owning this failpoint
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register an observer for activation/deactivation events
    pub fn subscribe(&self, observer: Arc<dyn TransitionObserver>) {
        self.observers.write().push(observer);
    }

    /// Validate and apply a new state
    ///
    /// The previous settings are replaced wholesale and statistics are reset.
    /// On a validation error the point is left untouched.
    pub fn configure(&self, state: &FailpointState) -> Result<(), ValidationError> {
        let settings = state.validate()?;
        self.apply(settings);
        Ok(())
    }

    /// Apply already validated settings
    pub fn apply(&self, settings: TriggerSettings) {
        let active = settings.is_active();
        {
            let mut state = self.state.lock();
            if active {
                state.set_time = Some(self.clock.now());
                state.trigger_count = Some(0);
            } else {
                state.set_time = None;
                state.trigger_count = None;
            }
            state.last_triggered = None;
            state.limit_reached = false;
            state.settings = settings;
            state.generation = state.generation.wrapping_add(1);
        }

        debug!(
            namespace = %self.namespace,
            failpoint = %self.name,
            active,
            "Failpoint configured"
        );

        let event = if active {
            TransitionEvent::activated(&*self.namespace, self.name.as_str())
        } else {
            TransitionEvent::deactivated(
                &*self.namespace,
                self.name.as_str(),
                DeactivationReason::Disabled,
            )
        };
        self.notify(&event);
    }

    /// Decide whether this evaluation fires
    ///
    /// Never fails: every state has a deterministic yes/no answer.
    pub fn evaluate(&self) -> bool {
        self.fire().is_some()
    }

    /// Evaluate and hand out the args of the configuration that fired
    ///
    /// Decision and args are read under one lock, so a concurrent
    /// reconfiguration can never pair one configuration's decision with
    /// another's payload.
    pub fn fire(&self) -> Option<Arc<FailpointArgs>> {
        self.fire_matching(None)
    }

    /// Args of the current configuration, or `None` once a limit latched
    ///
    /// Pass the result to [`TriggerPoint::fire_pending`] after inspecting it.
    #[must_use]
    pub fn pending_args(&self) -> Option<PendingArgs> {
        let state = self.state.lock();
        (!state.limit_reached).then(|| PendingArgs {
            generation: state.generation,
            args: state.args(),
        })
    }

    /// Evaluate only if the point still runs the configuration `pending`
    /// was taken from
    ///
    /// A reconfiguration in between means the caller judged stale args; the
    /// evaluation is skipped and nothing is counted.
    pub fn fire_pending(&self, pending: &PendingArgs) -> Option<Arc<FailpointArgs>> {
        self.fire_matching(Some(pending.generation))
    }

    fn fire_matching(&self, generation: Option<u64>) -> Option<Arc<FailpointArgs>> {
        let (fired, latched) = {
            let mut state = self.state.lock();
            if generation.is_some_and(|expected| expected != state.generation) {
                return None;
            }
            let (fires, latched) = self.step(&mut state);
            (fires.then(|| state.args()), latched)
        };

        if let Some(reason) = latched {
            debug!(
                namespace = %self.namespace,
                failpoint = %self.name,
                %reason,
                "Failpoint limit reached"
            );
            self.notify(&TransitionEvent::deactivated(
                &*self.namespace,
                self.name.as_str(),
                reason,
            ));
        }

        fired
    }

    fn step(&self, state: &mut PointState) -> (bool, Option<DeactivationReason>) {
        if state.limit_reached {
            return (false, None);
        }

        let fire_count = state.fire_count();
        if state.settings.max_count().is_some_and(|max| fire_count >= max) {
            state.limit_reached = true;
            return (false, Some(DeactivationReason::MaxCountReached));
        }

        let expired = match (state.settings.max_duration(), state.set_time) {
            (Some(max_duration), Some(set_time)) => self.clock.now() - set_time > max_duration,
            _ => false,
        };
        if expired {
            state.limit_reached = true;
            return (false, Some(DeactivationReason::MaxDurationElapsed));
        }

        let probability = state.settings.probability();
        let fires = if probability.is_never() {
            false
        } else if probability.is_always() {
            true
        } else {
            probability.admits(self.random.sample())
        };

        if fires {
            state.trigger_count = Some(state.fire_count() + 1);
            state.last_triggered = Some(self.clock.now());
        }

        (fires, None)
    }

    /// Whether a count or duration limit has latched the point inactive
    #[must_use]
    pub fn is_limit_reached(&self) -> bool {
        self.state.lock().limit_reached
    }

    /// Configured args, or an empty payload when none are configured
    #[must_use]
    pub fn args(&self) -> Arc<FailpointArgs> {
        self.state.lock().args()
    }

    /// Serializable view of the current state
    #[must_use]
    pub fn snapshot(&self) -> FailpointSnapshot {
        let state = self.state.lock();
        FailpointSnapshot {
            name: self.name.to_string(),
            probability: state.settings.probability().value(),
            max_count: state.settings.max_count(),
            max_duration_ms: state.settings.max_duration_ms(),
            args: state.settings.args().map(|args| (**args).clone()),
            set_time: state.set_time,
            trigger_count: state.trigger_count,
            last_triggered: state.last_triggered,
        }
    }

    fn notify(&self, event: &TransitionEvent) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_transition(event);
        }
    }
}
