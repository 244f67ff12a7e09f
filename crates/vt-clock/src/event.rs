//! `Event` — an immutable scheduled action.
//!
//! An event pairs a local fire offset (a reading of its owning sequence's
//! clock) with an action object.  The action runs exactly once, when the
//! clock selects the event as the globally next one; it receives a
//! [`StepCtx`] through which it can queue mutations of any sequence
//! (including its own) for application after it returns.

use std::fmt;

use vt_core::SimTime;

use crate::{ActionError, StepCtx};

// ── Action trait ──────────────────────────────────────────────────────────────

/// The effect carried by an [`Event`].
///
/// # Contract
///
/// - Runs at most once; the clock consumes the event when it fires.
/// - Must not block; it executes inline on the `step` call stack.
/// - An `Err` aborts the current step (the event stays consumed) and any
///   mutations queued on `ctx` before the failure are discarded.
pub trait EventAction {
    fn run(&mut self, ctx: &mut StepCtx<'_>) -> Result<(), ActionError>;
}

/// Adapter for infallible closures (see [`Event::from_fn`]).
struct FnAction<F>(F);

impl<F: FnMut(&mut StepCtx<'_>)> EventAction for FnAction<F> {
    fn run(&mut self, ctx: &mut StepCtx<'_>) -> Result<(), ActionError> {
        (self.0)(ctx);
        Ok(())
    }
}

/// Adapter for fallible closures (see [`Event::from_try_fn`]).
struct TryFnAction<F>(F);

impl<F: FnMut(&mut StepCtx<'_>) -> Result<(), ActionError>> EventAction for TryFnAction<F> {
    fn run(&mut self, ctx: &mut StepCtx<'_>) -> Result<(), ActionError> {
        (self.0)(ctx)
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A scheduled action: fire offset, optional label, boxed action.
///
/// Immutable once constructed — the fire offset is never reinterpreted after
/// the event enters a sequence.
pub struct Event {
    fire_offset: SimTime,
    label: Option<String>,
    action: Box<dyn EventAction>,
}

impl Event {
    /// Create an event firing at `fire_offset` on its sequence's local clock.
    ///
    /// # Panics
    /// Panics in debug mode if `fire_offset` is negative or non-finite.
    pub fn new(fire_offset: SimTime, action: impl EventAction + 'static) -> Event {
        debug_assert!(
            fire_offset.value().is_finite() && fire_offset.value() >= 0.0,
            "fire offset must be a non-negative real, got {fire_offset}"
        );
        Event {
            fire_offset,
            label: None,
            action: Box::new(action),
        }
    }

    /// Create an event from an infallible closure.
    pub fn from_fn<F>(fire_offset: SimTime, action: F) -> Event
    where
        F: FnMut(&mut StepCtx<'_>) + 'static,
    {
        Event::new(fire_offset, FnAction(action))
    }

    /// Create an event from a fallible closure.
    pub fn from_try_fn<F>(fire_offset: SimTime, action: F) -> Event
    where
        F: FnMut(&mut StepCtx<'_>) -> Result<(), ActionError> + 'static,
    {
        Event::new(fire_offset, TryFnAction(action))
    }

    /// Attach a readable (non-unique) label, surfaced via the observer when
    /// the event fires.
    pub fn with_label(mut self, label: impl Into<String>) -> Event {
        self.label = Some(label.into());
        self
    }

    /// Local time at which this event should run.
    #[inline]
    pub fn fire_offset(&self) -> SimTime {
        self.fire_offset
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the action.  Clock-internal; firing is only ever initiated by the
    /// owning sequence's clock.
    pub(crate) fn fire(&mut self, ctx: &mut StepCtx<'_>) -> Result<(), ActionError> {
        self.action.run(ctx)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("fire_offset", &self.fire_offset)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
