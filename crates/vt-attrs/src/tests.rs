//! Unit tests for vt-attrs.

use crate::{Attributes, Flat};

// ── Aggregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregation {
    use super::*;

    #[test]
    fn unknown_attribute_reads_zero() {
        let attrs = Attributes::new();
        assert_eq!(attrs.value("strength"), 0.0);
    }

    #[test]
    fn modifiers_sum() {
        let mut attrs = Attributes::new();
        attrs.apply("strength", Flat(10.0));
        attrs.apply("strength", Flat(2.5));
        attrs.apply("strength", Flat(-4.0));
        assert_eq!(attrs.value("strength"), 8.5);
        assert_eq!(attrs.modifier_count("strength"), 3);
    }

    #[test]
    fn attributes_are_independent() {
        let mut attrs = Attributes::new();
        attrs.apply("strength", Flat(10.0));
        attrs.apply("agility", Flat(7.0));
        assert_eq!(attrs.value("strength"), 10.0);
        assert_eq!(attrs.value("agility"), 7.0);
    }

    #[test]
    fn derived_modifier_reads_other_attributes() {
        let mut attrs = Attributes::new();
        attrs.apply("armor", Flat(40.0));
        attrs.apply("defense", Flat(5.0));
        attrs.apply("defense", |a: &Attributes| a.value("armor") * 0.25);
        assert_eq!(attrs.value("defense"), 15.0);

        // Derivations track later changes to their inputs.
        attrs.apply("armor", Flat(20.0));
        assert_eq!(attrs.value("defense"), 20.0);
    }

    #[test]
    fn remove_detaches_exactly_one_modifier() {
        let mut attrs = Attributes::new();
        let keep = attrs.apply("haste", Flat(1.0));
        let drop = attrs.apply("haste", Flat(2.0));

        assert!(attrs.remove(drop));
        assert_eq!(attrs.value("haste"), 1.0);

        // Removing again, or removing a never-applied handle, is a no-op.
        assert!(!attrs.remove(drop));
        assert_eq!(attrs.value("haste"), 1.0);
        let _ = keep;
    }
}

// ── Timed expiry through the scheduler ────────────────────────────────────────

#[cfg(test)]
mod timed {
    use std::cell::RefCell;
    use std::rc::Rc;

    use vt_clock::{Clock, Sequence, Step};
    use vt_core::SimTime;

    use crate::{Attributes, Flat, expiring};

    fn shared() -> Rc<RefCell<Attributes>> {
        Rc::new(RefCell::new(Attributes::new()))
    }

    #[test]
    fn buff_expires_at_its_local_offset() {
        let attrs = shared();
        let mut clock = Clock::new();
        // Persistent expiry sequence running at double speed: a buff with
        // local duration 4 lasts 2 units of global time.
        let buffs = clock.spawn(Sequence::empty().persistent(true).speed_source(2.0));

        let (_, expiry) = expiring(&attrs, "strength", Flat(25.0), SimTime(4.0));
        clock.push_event(buffs, expiry).unwrap();
        assert_eq!(attrs.borrow().value("strength"), 25.0);

        assert_eq!(
            clock.step().unwrap(),
            Step::Fired { at: SimTime(2.0), sequence: buffs }
        );
        assert_eq!(attrs.borrow().value("strength"), 0.0);
        // Persistent: stays registered for future buffs.
        assert!(clock.is_active(buffs));
    }

    #[test]
    fn pause_stretches_a_buff() {
        let attrs = shared();
        let mut clock = Clock::new();
        let buffs = clock.spawn(Sequence::empty().persistent(true));

        let (_, expiry) = expiring(&attrs, "shield", Flat(100.0), SimTime(1.0));
        clock.push_event(buffs, expiry).unwrap();
        clock.pause_for(buffs, 2.0).unwrap();

        assert_eq!(
            clock.step().unwrap(),
            Step::Fired { at: SimTime(3.0), sequence: buffs }
        );
        assert_eq!(attrs.borrow().value("shield"), 0.0);
    }

    #[test]
    fn early_removal_makes_expiry_a_no_op() {
        let attrs = shared();
        let mut clock = Clock::new();
        let buffs = clock.spawn(Sequence::empty().persistent(true));

        let (id, expiry) = expiring(&attrs, "haste", Flat(0.3), SimTime(5.0));
        clock.push_event(buffs, expiry).unwrap();

        // Dispelled before its time.
        assert!(attrs.borrow_mut().remove(id));
        assert_eq!(attrs.borrow().value("haste"), 0.0);

        // The expiry still fires as an event, but changes nothing.
        assert!(clock.step().unwrap().is_fired());
        assert_eq!(clock.now(), SimTime(5.0));
        assert_eq!(attrs.borrow().value("haste"), 0.0);
    }

    #[test]
    fn overlapping_buffs_expire_independently() {
        let attrs = shared();
        let mut clock = Clock::new();
        let buffs = clock.spawn(Sequence::empty().persistent(true));

        let (_, short) = expiring(&attrs, "power", Flat(10.0), SimTime(1.0));
        let (_, long) = expiring(&attrs, "power", Flat(5.0), SimTime(3.0));
        clock.push_event(buffs, short).unwrap();
        clock.push_event(buffs, long).unwrap();
        assert_eq!(attrs.borrow().value("power"), 15.0);

        assert!(clock.step().unwrap().is_fired());
        assert_eq!(attrs.borrow().value("power"), 5.0);

        assert!(clock.step().unwrap().is_fired());
        assert_eq!(attrs.borrow().value("power"), 0.0);
        assert_eq!(clock.now(), SimTime(3.0));
    }
}
