//! `vt-clock` — the discrete-event scheduler of the `rust_vt` framework.
//!
//! Several independently time-dilated event streams ([`Sequence`]s) are
//! driven toward one globally consistent firing order by a single [`Clock`].
//! Game systems schedule future actions (cooldowns, buff expiries, AI ticks)
//! as [`Event`]s instead of running their own timer loops.
//!
//! # Crate layout
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`event`]    | `Event`, `EventAction`                          |
//! | [`sequence`] | `Sequence`, `Pending`                           |
//! | [`clock`]    | `Clock`, `Step`, the step algorithm             |
//! | [`ctx`]      | `StepCtx` (deferred mutations from actions)     |
//! | [`observer`] | `ClockObserver`, `NoopObserver`                 |
//! | [`error`]    | `ClockError`, `ClockResult<T>`, `ActionError`   |
//!
//! # Step model (summary)
//!
//! ```text
//! step():
//!   wait(s)  = s.pause_remaining + (s.front.fire_offset − s.local_time) / s.speed
//!   winner   = argmin over active sequences (first-inserted wins ties;
//!              empty non-persistent sequences retire during the scan)
//!   none due → Idle (time untouched)
//!   Δ        = wait(winner)
//!   now += Δ;  every active sequence elapses Δ;  winner fires its front event
//! ```
//!
//! The wait depends on mutable speed/pause state, so it is recomputed from
//! scratch on every call — no ordering survives a step.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vt_clock::{Clock, Event, NoopObserver, Sequence};
//! use vt_core::SimTime;
//!
//! let mut clock = Clock::new();
//! let cooldowns = clock.spawn(Sequence::new(vec![
//!     Event::from_fn(SimTime(1.5), |_| println!("ability ready")),
//! ]));
//! clock.set_speed(cooldowns, 2.0)?;   // haste
//! clock.step()?;                      // fires at global t0.75
//! ```

pub mod clock;
pub mod ctx;
pub mod error;
pub mod event;
pub mod observer;
pub mod sequence;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{Clock, Step};
pub use ctx::StepCtx;
pub use error::{ActionError, ClockError, ClockResult};
pub use event::{Event, EventAction};
pub use observer::{ClockObserver, NoopObserver};
pub use sequence::{Pending, Sequence};
