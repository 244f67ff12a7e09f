//! Clock observer trait for progress reporting and instrumentation.

use vt_core::{SequenceId, SimTime};

/// Callbacks invoked by [`Clock::step_with`][crate::Clock::step_with] at key
/// points in a step.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — fire logger
///
/// ```rust,ignore
/// struct FireLog(Vec<(f64, String)>);
///
/// impl ClockObserver for FireLog {
///     fn on_fire(&mut self, at: SimTime, _seq: SequenceId, label: Option<&str>) {
///         self.0.push((at.value(), label.unwrap_or("?").to_owned()));
///     }
/// }
/// ```
pub trait ClockObserver {
    /// An event was selected; called after global time advanced, before the
    /// action runs.
    fn on_fire(&mut self, _at: SimTime, _sequence: SequenceId, _label: Option<&str>) {}

    /// A step found no finite-time event and left the clock untouched.
    fn on_idle(&mut self, _at: SimTime) {}

    /// A sequence ran dry and left the active set automatically.
    fn on_retire(&mut self, _at: SimTime, _sequence: SequenceId) {}
}

/// A [`ClockObserver`] that does nothing.  Use when you need to call
/// `step_with`/`run_until` but don't want callbacks.
pub struct NoopObserver;

impl ClockObserver for NoopObserver {}
