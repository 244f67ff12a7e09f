//! `SpeedSource` — "a current speed value, obtainable on demand".
//!
//! A sequence's speed multiplier converts global time deltas into local time
//! deltas.  It can be backed by a constant, by a shared mutable cell, or by a
//! computed function (e.g. a status-effect system deciding slow/haste without
//! the sequence knowing why).  The trait commits only to the accessor, not to
//! a storage strategy.
//!
//! # Contract
//!
//! - `current()` must return a finite, non-negative value.  Zero is legal and
//!   freezes the sequence's local clock.
//! - `current()` may return a different value on every call; the scheduler
//!   reads it afresh each step and never caches it.
//! - No `Send`/`Sync` bound: the whole framework is single-threaded, and
//!   `Rc`-backed sources are expected.
//!
//! Constant speeds set through `set_speed` are validated up front with
//! [`validate_speed`]; a dynamic source is trusted to uphold the contract
//! itself (it cannot be pre-validated).

use std::cell::Cell;
use std::rc::Rc;

use crate::{CoreError, CoreResult};

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Supplier of a sequence's current speed multiplier.
pub trait SpeedSource {
    /// The speed multiplier to apply right now.
    fn current(&self) -> f64;
}

/// A constant speed.
impl SpeedSource for f64 {
    #[inline]
    fn current(&self) -> f64 {
        *self
    }
}

/// A computed speed, re-evaluated on every read.
///
/// Wraps any `Fn() -> f64` closure:
///
/// ```rust,ignore
/// let seq = Sequence::new(events).speed_source(SpeedFn(move || haste.factor()));
/// ```
pub struct SpeedFn<F: Fn() -> f64>(pub F);

impl<F: Fn() -> f64> SpeedSource for SpeedFn<F> {
    #[inline]
    fn current(&self) -> f64 {
        (self.0)()
    }
}

// ── SharedSpeed ───────────────────────────────────────────────────────────────

/// A speed cell shared between a sequence and external logic.
///
/// Clone the handle, install one clone as the sequence's speed source, and
/// keep the other to drive it:
///
/// ```rust,ignore
/// let speed = SharedSpeed::new(1.0);
/// let seq = Sequence::new(events).speed_source(speed.clone());
/// // later, from game logic:
/// speed.set(0.5)?;
/// ```
#[derive(Clone, Debug)]
pub struct SharedSpeed(Rc<Cell<f64>>);

impl SharedSpeed {
    /// Create a handle with an initial speed.
    ///
    /// # Panics
    /// Panics in debug mode if `speed` is negative or non-finite.
    pub fn new(speed: f64) -> Self {
        debug_assert!(speed.is_finite() && speed >= 0.0, "invalid initial speed {speed}");
        SharedSpeed(Rc::new(Cell::new(speed)))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    /// Replace the stored speed.  Rejects negative and non-finite values.
    pub fn set(&self, speed: f64) -> CoreResult<()> {
        self.0.set(validate_speed(speed)?);
        Ok(())
    }
}

impl SpeedSource for SharedSpeed {
    #[inline]
    fn current(&self) -> f64 {
        self.0.get()
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Check that `speed` is a legal multiplier: finite and `>= 0`.
///
/// Returns the value unchanged so call sites can validate-and-store in one
/// expression.
pub fn validate_speed(speed: f64) -> CoreResult<f64> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(speed)
    } else {
        Err(CoreError::InvalidSpeed(speed))
    }
}
