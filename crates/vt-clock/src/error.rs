use thiserror::Error;

use vt_core::{CoreError, SequenceId};

/// Error value surfaced by a failing event action.
///
/// Boxed so actions can fail with any application error type; the clock
/// never inspects it, only forwards it out of `step`.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ClockError {
    /// The id was never issued by this clock, or its sequence was removed.
    #[error("unknown sequence {0}")]
    UnknownSequence(SequenceId),

    #[error("speed update rejected: {0}")]
    Speed(#[from] CoreError),

    /// An event action failed.  The event is already consumed; the step is
    /// aborted and not retried.
    #[error("event action failed: {0}")]
    Action(#[source] ActionError),
}

pub type ClockResult<T> = Result<T, ClockError>;
