//! `StepCtx` — the deferred-mutation context handed to a firing action.
//!
//! An action never holds a reference to the clock itself.  Instead it queues
//! [`Command`]s on the context; the clock applies them, in order, after the
//! action returns.  Registry iteration therefore can never be invalidated
//! mid-step, whatever the action does.

use vt_core::{CoreResult, SequenceId, SimTime, validate_speed};

use crate::{Event, Sequence};

// ── Command ───────────────────────────────────────────────────────────────────

/// A registry mutation queued by a firing action.
pub(crate) enum Command {
    SetSpeed { sequence: SequenceId, speed: f64 },
    PauseFor { sequence: SequenceId, duration: f64 },
    PushEvent { sequence: SequenceId, event: Event },
    Register(SequenceId),
    Deregister(SequenceId),
    Spawn(Sequence),
}

// ── StepCtx ───────────────────────────────────────────────────────────────────

/// What a firing event's action sees of the clock.
///
/// Reads are immediate (`now`, `sequence`); writes are deferred commands,
/// applied after the action returns and discarded if it fails.
pub struct StepCtx<'a> {
    now: SimTime,
    sequence: SequenceId,
    commands: &'a mut Vec<Command>,
}

impl<'a> StepCtx<'a> {
    pub(crate) fn new(now: SimTime, sequence: SequenceId, commands: &'a mut Vec<Command>) -> Self {
        StepCtx { now, sequence, commands }
    }

    /// Global time of the firing, i.e. the clock's `now()` for this step.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Id of the sequence whose event is firing, so an action can address
    /// its own sequence.
    #[inline]
    pub fn sequence(&self) -> SequenceId {
        self.sequence
    }

    /// Queue a constant-speed change for `sequence`.
    ///
    /// The value is validated here, at enqueue time, so a bad speed fails
    /// the action immediately rather than the step later.
    pub fn set_speed(&mut self, sequence: SequenceId, speed: f64) -> CoreResult<()> {
        let speed = validate_speed(speed)?;
        self.commands.push(Command::SetSpeed { sequence, speed });
        Ok(())
    }

    /// Queue a pause extension for `sequence`.
    pub fn pause_for(&mut self, sequence: SequenceId, duration: f64) {
        self.commands.push(Command::PauseFor { sequence, duration });
    }

    /// Queue an event insertion into an existing sequence.
    pub fn push_event(&mut self, sequence: SequenceId, event: Event) {
        self.commands.push(Command::PushEvent { sequence, event });
    }

    /// Queue (re-)activation of a sequence.
    pub fn register(&mut self, sequence: SequenceId) {
        self.commands.push(Command::Register(sequence));
    }

    /// Queue deactivation of a sequence.
    pub fn deregister(&mut self, sequence: SequenceId) {
        self.commands.push(Command::Deregister(sequence));
    }

    /// Queue insertion and registration of a new sequence.
    ///
    /// Fire-and-forget: the new id is assigned at apply time and not
    /// returned.  An action that needs the id should `Clock::insert` the
    /// sequence before the step and queue only `register`.
    pub fn spawn(&mut self, sequence: Sequence) {
        self.commands.push(Command::Spawn(sequence));
    }
}
