//! Time sources and the stopwatch used for phase deadlines and column reveal.

/// Clock capability and built-in clocks.
pub mod clock;
/// Start/stop/reset stopwatch.
pub mod timer;
