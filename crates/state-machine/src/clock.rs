//! Monotonic time source backing per-state elapsed time.

use std::time::{Duration, Instant};

/// Monotonic clock sampled by the machine when a state is entered.
///
/// Samples must never decrease and must be stable across a single tick.
pub trait Clock {
    /// Current monotonic time, relative to an arbitrary but fixed origin.
    fn now(&self) -> Duration;
}

/// Default [`Clock`] over [`std::time::Instant`], anchored at construction.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
