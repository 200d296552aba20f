//! Inline helpers
//!
//! Branch-style wrappers around [`Registry::should_fail`]: the caller passes
//! the failure path (and optionally the normal path) and the registry runs
//! the matching one. Every helper returns whether the failpoint fired.
//!
//! The `_sync` variants have no normal path; use them where the failure is
//! injected on top of the regular flow instead of replacing it.

use failpoints_domain::FailpointArgs;

use super::Registry;

impl Registry {
    /// Run `on_fire` with the failpoint's args if it fires, otherwise `on_else`
    ///
    /// ```
    /// use failpoints_application::Registry;
    ///
    /// let registry = Registry::unregistered();
    /// registry.set("flush", true).unwrap();
    ///
    /// let mut injected = 0;
    /// let fired = registry.inline("flush", |_| injected += 1, || {});
    /// assert!(fired);
    /// assert_eq!(injected, 1);
    /// ```
    pub fn inline<F, E>(&self, name: &str, on_fire: F, on_else: E) -> bool
    where
        F: FnOnce(&FailpointArgs),
        E: FnOnce(),
    {
        if self.inline_sync(name, on_fire) {
            true
        } else {
            on_else();
            false
        }
    }

    /// Like [`Registry::inline`], gated by a predicate over the args
    ///
    /// The predicate is not consulted once the failpoint's limits are
    /// exhausted.
    pub fn inline_conditionally<P, F, E>(
        &self,
        name: &str,
        predicate: P,
        on_fire: F,
        on_else: E,
    ) -> bool
    where
        P: FnOnce(&FailpointArgs) -> bool,
        F: FnOnce(&FailpointArgs),
        E: FnOnce(),
    {
        if self.inline_sync_conditionally(name, predicate, on_fire) {
            true
        } else {
            on_else();
            false
        }
    }

    /// Run `on_fire` with the failpoint's args if it fires
    pub fn inline_sync<F>(&self, name: &str, on_fire: F) -> bool
    where
        F: FnOnce(&FailpointArgs),
    {
        if let Some(args) = self.fire(name) {
            on_fire(&args);
            true
        } else {
            false
        }
    }

    /// Like [`Registry::inline_sync`], gated by a predicate over the args
    pub fn inline_sync_conditionally<P, F>(&self, name: &str, predicate: P, on_fire: F) -> bool
    where
        P: FnOnce(&FailpointArgs) -> bool,
        F: FnOnce(&FailpointArgs),
    {
        if let Some(args) = self.fire_conditionally(name, predicate) {
            on_fire(&args);
            true
        } else {
            false
        }
    }
}
