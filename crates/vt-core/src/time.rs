//! Virtual time model.
//!
//! # Design
//!
//! Time is an abstract real scalar: the framework imposes no unit, and there
//! is no mapping to wall-clock time anywhere in the workspace.  A `SimTime`
//! is a *reading* of some clock — the scheduler's global clock or one
//! sequence's local clock — while durations and deltas are plain `f64`
//! values:
//!
//!   reading + delta        → reading      (`SimTime + f64`)
//!   reading − reading      → delta        (`SimTime - SimTime`)
//!
//! `f64` rather than an integer tick because per-sequence speed multipliers
//! divide durations (`wait = offset_remaining / speed`), which has no exact
//! integer form.

use std::fmt;

/// A reading of a virtual clock (global or sequence-local).
///
/// Readings produced by the scheduler are always finite and non-negative;
/// the inner value is `pub` for literal construction in fixtures and
/// fixed-point comparisons.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The raw scalar value.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Elapsed duration from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, delta: f64) -> SimTime {
        SimTime(self.0 + delta)
    }
}

impl std::ops::AddAssign<f64> for SimTime {
    #[inline]
    fn add_assign(&mut self, delta: f64) {
        self.0 += delta;
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for SimTime {
    #[inline]
    fn from(v: f64) -> SimTime {
        SimTime(v)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
