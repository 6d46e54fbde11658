use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond clock supplied to [`crate::Timer`].
///
/// Readings must never decrease.
pub trait Clock {
    /// Current reading in milliseconds since an arbitrary origin.
    fn now_ms(&self) -> f64;
}

/// Wall-clock backed by [`Instant`], for live hosts.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is "now".
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
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Externally driven clock for offline rendering and tests.
///
/// Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the reading to `ms`. Earlier values are ignored.
    pub fn set_ms(&self, ms: f64) {
        if ms.is_finite() && ms > self.now.get() {
            self.now.set(ms);
        }
    }

    /// Advance the reading by `delta_ms` (negative deltas are ignored).
    pub fn advance_ms(&self, delta_ms: f64) {
        self.set_ms(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
