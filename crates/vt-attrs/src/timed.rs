//! Duration-limited modifiers, expiring through the scheduler.
//!
//! A timed buff is "a modifier plus a future event": the modifier applies
//! immediately, and its removal is an ordinary scheduler event on whatever
//! sequence the caller keeps for expiries.  Time dilation and pausing of
//! that sequence therefore stretch or freeze the buff's remaining duration
//! with no extra bookkeeping here.

use std::cell::RefCell;
use std::rc::Rc;

use vt_clock::Event;
use vt_core::{ModifierId, SimTime};

use crate::{Attributes, Modifier};

/// Apply `modifier` to `attribute` now and return the expiry event that
/// removes it again.
///
/// `expires_at` is a *local* fire offset on whichever sequence the caller
/// pushes the event into (typically via `Clock::push_event`).  The returned
/// [`ModifierId`] allows early removal — the expiry event then becomes a
/// harmless no-op, since `Attributes::remove` ignores unknown handles.
pub fn expiring(
    attrs: &Rc<RefCell<Attributes>>,
    attribute: impl Into<String>,
    modifier: impl Modifier + 'static,
    expires_at: SimTime,
) -> (ModifierId, Event) {
    let id = attrs.borrow_mut().apply(attribute, modifier);
    let store = Rc::clone(attrs);
    let event = Event::from_fn(expires_at, move |_| {
        store.borrow_mut().remove(id);
    })
    .with_label("modifier-expiry");
    (id, event)
}
