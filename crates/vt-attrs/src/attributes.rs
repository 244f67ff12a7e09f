//! `Attributes` — named values computed by summing stacked modifiers.
//!
//! An attribute has no stored value of its own: reading it reduces the
//! modifiers currently applied to it (an attribute with none reads `0.0`).
//! Game systems layer base stats, buffs, and equipment as independent
//! modifiers and remove each by the handle `apply` returned.

use std::collections::HashMap;
use std::fmt;

use vt_core::ModifierId;

// ── Modifier ──────────────────────────────────────────────────────────────────

/// One contribution to an attribute's value.
///
/// The whole store is passed back in so a modifier can derive its value from
/// other attributes ("+10% of armor").  The caller is responsible for keeping
/// such derivations acyclic; a cycle recurses until the stack overflows.
pub trait Modifier {
    fn value(&self, attrs: &Attributes) -> f64;
}

/// A constant contribution.
pub struct Flat(pub f64);

impl Modifier for Flat {
    #[inline]
    fn value(&self, _attrs: &Attributes) -> f64 {
        self.0
    }
}

/// Any `Fn(&Attributes) -> f64` closure is a modifier.
impl<F: Fn(&Attributes) -> f64> Modifier for F {
    #[inline]
    fn value(&self, attrs: &Attributes) -> f64 {
        self(attrs)
    }
}

// ── Attributes ────────────────────────────────────────────────────────────────

/// Store of named attributes and the modifiers applied to them.
#[derive(Default)]
pub struct Attributes {
    entries: HashMap<String, Vec<(ModifierId, Box<dyn Modifier>)>>,
    next_id: u32,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `attribute`: the sum of its modifiers, `0.0` if none
    /// have ever been applied.
    pub fn value(&self, attribute: &str) -> f64 {
        match self.entries.get(attribute) {
            None => 0.0,
            Some(modifiers) => modifiers.iter().map(|(_, m)| m.value(self)).sum(),
        }
    }

    /// Apply `modifier` to `attribute`, returning the handle that `remove`
    /// takes.  Handles are unique across all attributes of this store.
    pub fn apply(
        &mut self,
        attribute: impl Into<String>,
        modifier: impl Modifier + 'static,
    ) -> ModifierId {
        let id = ModifierId(self.next_id);
        self.next_id += 1;
        self.entries
            .entry(attribute.into())
            .or_default()
            .push((id, Box::new(modifier)));
        id
    }

    /// Remove one applied modifier.  Returns `false` if the handle is not
    /// (or no longer) applied; removing twice is harmless.
    pub fn remove(&mut self, id: ModifierId) -> bool {
        for modifiers in self.entries.values_mut() {
            if let Some(at) = modifiers.iter().position(|(mid, _)| *mid == id) {
                modifiers.remove(at);
                return true;
            }
        }
        false
    }

    /// How many modifiers are applied to `attribute`.
    pub fn modifier_count(&self, attribute: &str) -> usize {
        self.entries.get(attribute).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, modifiers) in &self.entries {
            map.entry(&name, &modifiers.len());
        }
        map.finish()
    }
}
