//! Unit tests for vt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ModifierId, SequenceId};

    #[test]
    fn index_cast() {
        assert_eq!(SequenceId(42).index(), 42);
        assert_eq!(ModifierId(0).index(), 0);
    }

    #[test]
    fn ordering() {
        assert!(SequenceId(0) < SequenceId(1));
        assert!(ModifierId(100) > ModifierId(99));
    }

    #[test]
    fn display() {
        assert_eq!(SequenceId(7).to_string(), "SequenceId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.0, SimTime(15.0));
        assert_eq!(SimTime(15.0) - SimTime(10.0), 5.0);
        assert_eq!(SimTime(12.5).since(SimTime(10.0)), 2.5);
    }

    #[test]
    fn add_assign() {
        let mut t = SimTime::ZERO;
        t += 0.75;
        t += 0.25;
        assert_eq!(t, SimTime(1.0));
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(1.5).to_string(), "t1.5");
    }
}

#[cfg(test)]
mod speed {
    use std::rc::Rc;

    use crate::{CoreError, SharedSpeed, SpeedFn, SpeedSource, validate_speed};

    #[test]
    fn constant_source() {
        assert_eq!(2.0f64.current(), 2.0);
        assert_eq!(0.0f64.current(), 0.0);
    }

    #[test]
    fn fn_source_reads_fresh_value() {
        let cell = Rc::new(std::cell::Cell::new(1.0));
        let reader = Rc::clone(&cell);
        let source = SpeedFn(move || reader.get());
        assert_eq!(source.current(), 1.0);
        cell.set(3.0);
        assert_eq!(source.current(), 3.0);
    }

    #[test]
    fn shared_speed_set_and_read() {
        let speed = SharedSpeed::new(1.0);
        let handle = speed.clone();
        handle.set(0.5).unwrap();
        assert_eq!(speed.current(), 0.5);
    }

    #[test]
    fn shared_speed_rejects_negative() {
        let speed = SharedSpeed::new(1.0);
        assert!(speed.set(-1.0).is_err());
        // Rejected value must not be stored.
        assert_eq!(speed.get(), 1.0);
    }

    #[test]
    fn validate_accepts_zero() {
        assert_eq!(validate_speed(0.0).unwrap(), 0.0);
        assert_eq!(validate_speed(2.5).unwrap(), 2.5);
    }

    #[test]
    fn validate_rejects_out_of_domain() {
        for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match validate_speed(bad) {
                Err(CoreError::InvalidSpeed(v)) => assert!(v.is_nan() || v == bad),
                Ok(_) => panic!("{bad} should be rejected"),
            }
        }
    }
}
