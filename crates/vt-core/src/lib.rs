//! `vt-core` — foundational types for the `rust_vt` virtual-time framework.
//!
//! This crate is a dependency of every other `vt-*` crate.  It has no
//! intra-workspace dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                      |
//! |-----------|-----------------------------------------------|
//! | [`ids`]   | `SequenceId`, `ModifierId`                    |
//! | [`time`]  | `SimTime`                                     |
//! | [`speed`] | `SpeedSource`, `SharedSpeed`, `validate_speed`|
//! | [`error`] | `CoreError`, `CoreResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the plain-data types.     |

pub mod error;
pub mod ids;
pub mod speed;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ModifierId, SequenceId};
pub use speed::{SharedSpeed, SpeedFn, SpeedSource, validate_speed};
pub use time::SimTime;
