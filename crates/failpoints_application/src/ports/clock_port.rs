//! Clock port
//!
//! Injectable source of the current time, so duration limits can be tested
//! without sleeping.

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// Port for reading the current time
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
