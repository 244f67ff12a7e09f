//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From` impls.

use thiserror::Error;

/// The base error type for `vt-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A speed multiplier outside the legal domain (finite, `>= 0`).
    #[error("speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f64),
}

/// Shorthand result type for `vt-core` operations.
pub type CoreResult<T> = Result<T, CoreError>;
