//! Wall-clock time for UI-rate decisions (hover debounce).
//!
//! Kept apart from the audio clock, which belongs to the backend.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub trait WallClock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for InstantClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Accepts a call only if `min_interval` has passed since the last accepted one.
pub struct RateLimiter {
    clock: Box<dyn WallClock>,
    min_interval: Duration,
    last: Option<Duration>,
}

impl RateLimiter {
    pub fn new(clock: Box<dyn WallClock>, min_interval: Duration) -> Self {
        Self {
            clock,
            min_interval,
            last: None,
        }
    }

    pub fn try_acquire(&mut self) -> bool {
        let now = self.clock.now();
        match self.last {
            Some(prev) if now.saturating_sub(prev) < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
