//! Clock abstraction.
//!
//! The voting core never reads the system time directly; every operation
//! that needs "now" takes it from a [`Clock`] supplied by the application.

use crate::Timestamp;

/// Source of wall-clock time for window arithmetic.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The real system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
