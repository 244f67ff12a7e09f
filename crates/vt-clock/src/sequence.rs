//! `Sequence` — an owned, time-ordered queue of events with local-time state.
//!
//! # Local time model
//!
//! Each sequence experiences time at its own rate.  When the clock advances
//! the global clock by `Δ`, a sequence first absorbs `Δ` into any remaining
//! pause, then adds `remaining Δ × speed` to its local clock:
//!
//! ```text
//! wait-to-next-event = pause_remaining + (front.fire_offset − local_time) / speed
//! ```
//!
//! Pauses are measured in *global* time (unaffected by speed); fire offsets
//! are points on the *local* clock.  Speed may change between any two steps,
//! which is why the clock recomputes this wait from scratch every step.

use std::collections::VecDeque;
use std::fmt;

use vt_core::{CoreResult, SimTime, SpeedSource, validate_speed};

use crate::Event;

// ── Pending ───────────────────────────────────────────────────────────────────

/// What a sequence reports to the selection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pending {
    /// Next event fires after this much global time.  Always finite and
    /// non-negative.
    Due(f64),
    /// Nothing will fire on its own: empty-but-persistent, frozen at speed
    /// zero, or paused forever.  The sequence stays registered.
    Never,
    /// Empty and non-persistent — the clock retires it on discovery.
    Exhausted,
}

// ── Sequence ──────────────────────────────────────────────────────────────────

/// An ordered queue of pending events plus local-time state.
///
/// Constructed standalone, then handed to a [`Clock`][crate::Clock], which
/// owns it for the duration of its registration and returns it via
/// `Clock::remove`.
pub struct Sequence {
    /// Pending events, sorted ascending by fire offset; front fires next.
    events: VecDeque<Event>,
    /// Time elapsed on this sequence's own clock.
    local_time: SimTime,
    /// Speed multiplier source, read afresh on every use.
    speed: Box<dyn SpeedSource>,
    /// Global time left to sit out before local time moves again.
    pause_remaining: f64,
    /// Whether the sequence stays registered after running dry.
    persistent: bool,
}

impl Sequence {
    /// Create a sequence from `events`, sorting them by fire offset.
    ///
    /// The sort is stable: events sharing an offset fire in the order given.
    /// Speed defaults to the constant `1.0`; the sequence is non-persistent.
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by(|a, b| a.fire_offset().value().total_cmp(&b.fire_offset().value()));
        Sequence {
            events: events.into(),
            local_time: SimTime::ZERO,
            speed: Box::new(1.0),
            pause_remaining: 0.0,
            persistent: false,
        }
    }

    /// A sequence with no events.  Mostly useful persistent, as a target for
    /// later `push` calls.
    pub fn empty() -> Self {
        Sequence::new(Vec::new())
    }

    /// Builder: keep the sequence registered after it runs dry.
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Builder: install a speed source (constant, [`SharedSpeed`], closure…).
    ///
    /// [`SharedSpeed`]: vt_core::SharedSpeed
    pub fn speed_source(mut self, source: impl SpeedSource + 'static) -> Self {
        self.speed = Box::new(source);
        self
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Insert an event, keeping the queue sorted by fire offset.
    ///
    /// Insertion is stable: an event lands after existing events with the
    /// same offset.  An offset already behind `local_time` is legal; the
    /// event fires on the next step without rewinding any clock.
    pub fn push(&mut self, event: Event) {
        let offset = event.fire_offset();
        let at = self
            .events
            .iter()
            .rposition(|e| e.fire_offset() <= offset)
            .map_or(0, |i| i + 1);
        self.events.insert(at, event);
    }

    /// Replace the speed source with the constant `speed`.
    ///
    /// Takes effect from the next elapse; time already elapsed is never
    /// reinterpreted.  Rejects negative and non-finite values; zero is legal
    /// and freezes local time.
    pub fn set_speed(&mut self, speed: f64) -> CoreResult<()> {
        self.speed = Box::new(validate_speed(speed)?);
        Ok(())
    }

    /// Replace the speed source with a dynamic one.
    ///
    /// The source is trusted to return finite, non-negative values (see the
    /// [`SpeedSource`] contract).
    pub fn set_speed_source(&mut self, source: impl SpeedSource + 'static) {
        self.speed = Box::new(source);
    }

    /// Pause this sequence for `duration` of global time.
    ///
    /// Only ever extends: pausing for less than the remaining pause (or for
    /// a negative/NaN duration) is a no-op.  `f64::INFINITY` freezes the
    /// sequence permanently — prefer `set_speed(0.0)` for a reversible
    /// freeze.
    pub fn pause_for(&mut self, duration: f64) {
        if duration > self.pause_remaining {
            self.pause_remaining = duration;
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn local_time(&self) -> SimTime {
        self.local_time
    }

    #[inline]
    pub fn pause_remaining(&self) -> f64 {
        self.pause_remaining
    }

    #[inline]
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// The speed multiplier as of right now.
    pub fn current_speed(&self) -> f64 {
        self.speed.current()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fire offset of the next event, if any.
    pub fn next_fire_offset(&self) -> Option<SimTime> {
        self.events.front().map(Event::fire_offset)
    }

    // ── Scheduling arithmetic ─────────────────────────────────────────────

    /// Global time until this sequence's next event, recomputed from the
    /// current speed and pause state.
    pub fn pending(&self) -> Pending {
        let Some(front) = self.events.front() else {
            return if self.persistent {
                Pending::Never
            } else {
                Pending::Exhausted
            };
        };
        let speed = self.speed.current();
        debug_assert!(
            speed.is_finite() && speed >= 0.0,
            "speed source returned {speed}"
        );
        if speed == 0.0 {
            return Pending::Never;
        }
        // Clamp at zero so an event pushed behind local_time fires on the
        // next step instead of rewinding the global clock.
        let wait = self.pause_remaining + ((front.fire_offset() - self.local_time) / speed).max(0.0);
        if wait.is_finite() {
            Pending::Due(wait)
        } else {
            Pending::Never
        }
    }

    /// Advance local time by a global `delta`, absorbing any pause first.
    ///
    /// Called by the clock on every active sequence each step, including the
    /// one about to fire.
    pub(crate) fn elapse(&mut self, mut delta: f64) {
        if self.pause_remaining > 0.0 {
            if self.pause_remaining >= delta {
                self.pause_remaining -= delta;
                return;
            }
            delta -= self.pause_remaining;
            self.pause_remaining = 0.0;
        }
        self.local_time += delta * self.speed.current();
    }

    /// Remove and return the front event.
    pub(crate) fn pop_front(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("pending_events", &self.events.len())
            .field("local_time", &self.local_time)
            .field("pause_remaining", &self.pause_remaining)
            .field("persistent", &self.persistent)
            .finish_non_exhaustive()
    }
}
