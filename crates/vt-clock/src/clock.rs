//! The `Clock` — sequence registry, global time, and the step algorithm.

use vt_core::{SequenceId, SimTime};

use crate::ctx::{Command, StepCtx};
use crate::{ClockError, ClockObserver, ClockResult, Event, Pending, Sequence};

// ── Step outcome ──────────────────────────────────────────────────────────────

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// One event fired at global time `at`, from `sequence`.
    Fired { at: SimTime, sequence: SequenceId },
    /// No registered sequence had a finite time-to-next-event; global time
    /// did not advance.
    Idle,
}

impl Step {
    pub fn is_fired(&self) -> bool {
        matches!(self, Step::Fired { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Step::Idle)
    }
}

// ── Registry slot ─────────────────────────────────────────────────────────────

struct Slot {
    /// `None` once the sequence has been handed back via `remove`.
    sequence: Option<Sequence>,
    /// Whether the sequence participates in stepping.
    active: bool,
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// The scheduler root: owns all registered sequences and the global clock.
///
/// Sequences are addressed by [`SequenceId`] handles issued at insertion.
/// Slot indices are never reused, so a handle can never silently alias a
/// later sequence; operations on a removed id return
/// [`ClockError::UnknownSequence`].
///
/// # The step algorithm
///
/// Each [`step`][Clock::step] recomputes, by linear scan, every active
/// sequence's time-to-next-event and fires the minimum.  The scan is
/// deliberately not a persistent priority structure: the wait is derived
/// from per-sequence speed and pause state that may change between any two
/// steps (including from inside the just-fired action), so a heap keyed on
/// absolute fire time would go stale without any event being inserted or
/// removed.
pub struct Clock {
    now: SimTime,
    slots: Vec<Slot>,
}

impl Clock {
    pub fn new() -> Self {
        Clock {
            now: SimTime::ZERO,
            slots: Vec::new(),
        }
    }

    /// Current global time.  Monotonically non-decreasing; advances only by
    /// the delta computed inside a step.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    // ── Registry management ───────────────────────────────────────────────

    /// Take ownership of `sequence` without registering it.  The returned
    /// handle addresses it in all other calls.
    pub fn insert(&mut self, sequence: Sequence) -> SequenceId {
        let id = SequenceId(self.slots.len() as u32);
        self.slots.push(Slot {
            sequence: Some(sequence),
            active: false,
        });
        id
    }

    /// `insert` + `register` in one call.
    pub fn spawn(&mut self, sequence: Sequence) -> SequenceId {
        let id = self.insert(sequence);
        self.slots[id.index()].active = true;
        id
    }

    /// Add `id` to the active set.  Idempotent: registering an already
    /// active sequence is a no-op.
    ///
    /// A sequence keeps its slot across deregister/register cycles, and with
    /// it its position in the deterministic tie-break order (first inserted
    /// wins ties).
    pub fn register(&mut self, id: SequenceId) -> ClockResult<()> {
        self.slot_mut(id)?.active = true;
        Ok(())
    }

    /// Remove `id` from the active set.  Idempotent; the sequence stays
    /// owned by the clock and can be re-registered or `remove`d.
    ///
    /// Deregistration takes effect on the next step: it cannot recall an
    /// event already firing in the current one.
    pub fn deregister(&mut self, id: SequenceId) -> ClockResult<()> {
        self.slot_mut(id)?.active = false;
        Ok(())
    }

    /// Hand the sequence back to the caller, deactivating it.  Subsequent
    /// operations on `id` return `UnknownSequence`.
    pub fn remove(&mut self, id: SequenceId) -> Option<Sequence> {
        let slot = self.slots.get_mut(id.index())?;
        slot.active = false;
        slot.sequence.take()
    }

    pub fn is_active(&self, id: SequenceId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(|s| s.active && s.sequence.is_some())
    }

    /// Number of sequences currently in the active set.
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.active && s.sequence.is_some())
            .count()
    }

    pub fn sequence(&self, id: SequenceId) -> Option<&Sequence> {
        self.slots.get(id.index())?.sequence.as_ref()
    }

    pub fn sequence_mut(&mut self, id: SequenceId) -> Option<&mut Sequence> {
        self.slots.get_mut(id.index())?.sequence.as_mut()
    }

    // ── Boundary pass-throughs ────────────────────────────────────────────

    /// Set a constant speed on `id` (validated; see `Sequence::set_speed`).
    pub fn set_speed(&mut self, id: SequenceId, speed: f64) -> ClockResult<()> {
        self.seq_mut(id)?.set_speed(speed)?;
        Ok(())
    }

    /// Extend `id`'s pause (see `Sequence::pause_for`).
    pub fn pause_for(&mut self, id: SequenceId, duration: f64) -> ClockResult<()> {
        self.seq_mut(id)?.pause_for(duration);
        Ok(())
    }

    /// Insert an event into `id`'s queue, keeping it sorted.
    pub fn push_event(&mut self, id: SequenceId, event: Event) -> ClockResult<()> {
        self.seq_mut(id)?.push(event);
        Ok(())
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Fire the globally next event, if any.  See [`Clock::step_with`].
    pub fn step(&mut self) -> ClockResult<Step> {
        self.step_with(&mut crate::NoopObserver)
    }

    /// Fire the globally next event, reporting to `observer`.
    ///
    /// 1. Scan active sequences in slot order.  Exhausted ones (empty,
    ///    non-persistent) are retired on the spot.  The minimum finite wait
    ///    wins; on an exact tie the first-inserted sequence wins.
    /// 2. No winner → `Step::Idle`; time does not advance.
    /// 3. Otherwise advance global time by the winning wait, `elapse` every
    ///    active sequence by it (passive sequences age too), then pop and
    ///    run the winner's front event.
    /// 4. Mutations the action queued on its [`StepCtx`] are applied after
    ///    it returns; an action error aborts the step with the event
    ///    consumed and the queued mutations discarded.
    ///
    /// Nothing is cached between calls; every step recomputes the scan.
    pub fn step_with<O: ClockObserver>(&mut self, observer: &mut O) -> ClockResult<Step> {
        self.step_inner(None, observer)
    }

    /// Step repeatedly while the next event fires at or before `deadline`.
    ///
    /// Returns the number of events fired.  Global time ends at the last
    /// fire time (or wherever it already was) — it is never padded up to
    /// `deadline`.
    pub fn run_until<O: ClockObserver>(
        &mut self,
        deadline: SimTime,
        observer: &mut O,
    ) -> ClockResult<usize> {
        let mut fired = 0;
        while self.step_inner(Some(deadline), observer)?.is_fired() {
            fired += 1;
        }
        Ok(fired)
    }

    fn step_inner<O: ClockObserver>(
        &mut self,
        horizon: Option<SimTime>,
        observer: &mut O,
    ) -> ClockResult<Step> {
        // ── Selection pass ────────────────────────────────────────────────
        let mut winner: Option<(usize, f64)> = None;
        for idx in 0..self.slots.len() {
            if !self.slots[idx].active {
                continue;
            }
            let pending = self.slots[idx]
                .sequence
                .as_ref()
                .expect("active slot holds a sequence")
                .pending();
            match pending {
                Pending::Exhausted => {
                    self.slots[idx].active = false;
                    observer.on_retire(self.now, SequenceId(idx as u32));
                }
                Pending::Never => {}
                Pending::Due(wait) => {
                    // Strict `<` keeps the first-inserted sequence on ties.
                    if winner.is_none_or(|(_, best)| wait < best) {
                        winner = Some((idx, wait));
                    }
                }
            }
        }

        let Some((idx, delta)) = winner else {
            observer.on_idle(self.now);
            return Ok(Step::Idle);
        };
        if let Some(deadline) = horizon {
            if self.now + delta > deadline {
                return Ok(Step::Idle);
            }
        }
        let winner_id = SequenceId(idx as u32);

        // ── Advance: every active sequence ages by the same delta ─────────
        self.now += delta;
        for slot in &mut self.slots {
            if slot.active {
                if let Some(seq) = slot.sequence.as_mut() {
                    seq.elapse(delta);
                }
            }
        }

        // ── Fire ──────────────────────────────────────────────────────────
        let mut event = self.slots[idx]
            .sequence
            .as_mut()
            .expect("active slot holds a sequence")
            .pop_front()
            .expect("selected sequence must have a pending event");
        observer.on_fire(self.now, winner_id, event.label());

        let mut commands = Vec::new();
        let mut ctx = StepCtx::new(self.now, winner_id, &mut commands);
        event.fire(&mut ctx).map_err(ClockError::Action)?;

        // ── Apply deferred commands, in enqueue order ─────────────────────
        for command in commands {
            self.apply(command)?;
        }

        // ── Retire the winner if the fire (post-commands) left it dry ─────
        let slot = &mut self.slots[idx];
        if slot.active
            && slot
                .sequence
                .as_ref()
                .is_some_and(|s| s.is_empty() && !s.is_persistent())
        {
            slot.active = false;
            observer.on_retire(self.now, winner_id);
        }

        Ok(Step::Fired {
            at: self.now,
            sequence: winner_id,
        })
    }

    fn apply(&mut self, command: Command) -> ClockResult<()> {
        match command {
            Command::SetSpeed { sequence, speed } => self.set_speed(sequence, speed),
            Command::PauseFor { sequence, duration } => self.pause_for(sequence, duration),
            Command::PushEvent { sequence, event } => self.push_event(sequence, event),
            Command::Register(id) => self.register(id),
            Command::Deregister(id) => self.deregister(id),
            Command::Spawn(sequence) => {
                self.spawn(sequence);
                Ok(())
            }
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn slot_mut(&mut self, id: SequenceId) -> ClockResult<&mut Slot> {
        self.slots
            .get_mut(id.index())
            .filter(|s| s.sequence.is_some())
            .ok_or(ClockError::UnknownSequence(id))
    }

    fn seq_mut(&mut self, id: SequenceId) -> ClockResult<&mut Sequence> {
        self.slot_mut(id).map(|s| {
            s.sequence
                .as_mut()
                .expect("slot_mut only returns occupied slots")
        })
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}
