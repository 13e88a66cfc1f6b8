// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-element action map: event type → action name.

use alloc::string::String;
use alloc::vec::Vec;

/// A mapping from event type to action name, as declared by one attribute
/// value.
///
/// At most one action per event type; inserting an existing type replaces
/// the previous action (last wins, matching attribute clause order). Lookups
/// for unbound types answer `None` rather than erroring.
///
/// Maps published through the [`ActionCache`](crate::cache::ActionCache) are
/// never mutated again; namespace qualification operates on clones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionMap {
    // Attribute values carry a handful of clauses at most; a flat pair list
    // beats any keyed structure at this size.
    entries: Vec<(String, String)>,
}

impl ActionMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The action bound to `event_type`, if any.
    pub fn get(&self, event_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == event_type)
            .map(|(_, a)| a.as_str())
    }

    /// Bind `action` to `event_type`, replacing any existing binding.
    pub fn set(&mut self, event_type: &str, action: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| t == event_type) {
            entry.1.clear();
            entry.1.push_str(action);
        } else {
            self.entries
                .push((String::from(event_type), String::from(action)));
        }
    }

    /// True if no event type is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bound event types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, a)| (t.as_str(), a.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut m = ActionMap::new();
        m.set("click", "open");
        m.set("mouseover", "peek");
        assert_eq!(m.get("click"), Some("open"));
        assert_eq!(m.get("mouseover"), Some("peek"));
        assert_eq!(m.get("keydown"), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn set_replaces_last_wins() {
        let mut m = ActionMap::new();
        m.set("click", "first");
        m.set("click", "second");
        assert_eq!(m.get("click"), Some("second"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn iter_preserves_declaration_order() {
        let mut m = ActionMap::new();
        m.set("b", "y");
        m.set("a", "x");
        let pairs: Vec<_> = m.iter().collect();
        assert_eq!(pairs, alloc::vec![("b", "y"), ("a", "x")]);
    }
}
