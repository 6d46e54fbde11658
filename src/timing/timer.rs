use crate::timing::clock::Clock;

/// Stopwatch over a [`Clock`].
///
/// `elapsed = accumulated + (now - started_at)` while running and `accumulated` while stopped.
#[derive(Debug, Clone)]
pub struct Timer<C: Clock> {
    clock: C,
    started_at: f64,
    stopped_at: Option<f64>,
    accumulated: f64,
}

impl<C: Clock> Timer<C> {
    /// Create a running timer starting at the clock's current reading.
    pub fn new(clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            started_at: now,
            stopped_at: None,
            accumulated: 0.0,
        }
    }

    /// Resume accrual from the current reading.
    pub fn start(&mut self) {
        if self.stopped_at.is_none() {
            return;
        }
        self.started_at = self.clock.now_ms();
        self.stopped_at = None;
    }

    /// Freeze the elapsed value.
    pub fn stop(&mut self) {
        if self.stopped_at.is_some() {
            return;
        }
        let now = self.clock.now_ms();
        self.accumulated += (now - self.started_at).max(0.0);
        self.stopped_at = Some(now);
    }

    /// Zero the accumulator and restart running from now.
    pub fn reset(&mut self) {
        self.started_at = self.clock.now_ms();
        self.stopped_at = None;
        self.accumulated = 0.0;
    }

    /// Elapsed milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        match self.stopped_at {
            Some(_) => self.accumulated,
            None => self.accumulated + (self.clock.now_ms() - self.started_at).max(0.0),
        }
    }

    /// `true` while accruing.
    pub fn is_running(&self) -> bool {
        self.stopped_at.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/timer.rs"]
mod tests;
