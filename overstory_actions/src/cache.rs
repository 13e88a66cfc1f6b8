// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parsed-attribute cache: raw string → interned [`ActionMap`] handle.
//!
//! ## Overview
//!
//! Many elements share the same attribute value (every row of a list, every
//! item of a menu), so parsing dominates only when uncached. The cache interns
//! each distinct raw string once and hands out a small copyable [`MapId`];
//! repeated interns of the same string return the same handle, which is the
//! identity guarantee callers rely on for per-element memoization.
//!
//! Published maps are immutable. Callers that need to rewrite action names
//! (namespace qualification) clone the map first; the shared interned map
//! stays unqualified.

use alloc::string::String;
use alloc::vec::Vec;

use crate::map::ActionMap;
use crate::names;
use crate::parse::parse_attribute;

/// Handle for an interned [`ActionMap`].
///
/// Plain index, no generation: the cache is append-only, so a `MapId` never
/// goes stale within the cache that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MapId(pub(crate) u32);

impl MapId {
    /// The shared empty sentinel map.
    ///
    /// Every attribute-less element binds this single map so absence costs
    /// no allocation. Slot `0` is reserved for it in every cache.
    pub const EMPTY: MapId = MapId(0);

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Interning cache for parsed attribute values, plus the mutable default
/// event type used by type-less clauses.
///
/// One cache per contract; the source system kept this process-wide, but an
/// explicit value keeps tests deterministic and allows several independent
/// contracts in one runtime.
#[derive(Clone, Debug)]
pub struct ActionCache {
    maps: Vec<ActionMap>,
    // Sorted by raw string for binary search; attribute values repeat
    // verbatim, so exact-string keying is the right granularity.
    by_raw: Vec<(String, MapId)>,
    default_event_type: String,
}

impl Default for ActionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionCache {
    /// Create a cache with the default event type `"click"`.
    pub fn new() -> Self {
        Self {
            maps: alloc::vec![ActionMap::new()],
            by_raw: Vec::new(),
            default_event_type: String::from(names::CLICK),
        }
    }

    /// The event type bound by clauses that omit one.
    pub fn default_event_type(&self) -> &str {
        &self.default_event_type
    }

    /// Change the default event type.
    ///
    /// Affects only attributes interned after the change; already-interned
    /// maps keep the bindings they were parsed with.
    pub fn set_default_event_type(&mut self, event_type: &str) {
        self.default_event_type.clear();
        self.default_event_type.push_str(event_type);
    }

    /// Intern `raw`, parsing it on first sight.
    ///
    /// Absent, empty, and effectively-empty values (whitespace, bare
    /// separators) all answer [`MapId::EMPTY`]. Repeated interns of the same
    /// raw string return the same handle.
    pub fn intern(&mut self, raw: &str) -> MapId {
        if raw.trim().is_empty() {
            return MapId::EMPTY;
        }
        match self.by_raw.binary_search_by(|(r, _)| r.as_str().cmp(raw)) {
            Ok(i) => self.by_raw[i].1,
            Err(i) => {
                let map = parse_attribute(raw, &self.default_event_type);
                let id = if map.is_empty() {
                    MapId::EMPTY
                } else {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "Map handles are intentionally 32-bit, like node ids."
                    )]
                    let id = MapId(self.maps.len() as u32);
                    self.maps.push(map);
                    id
                };
                self.by_raw.insert(i, (String::from(raw), id));
                id
            }
        }
    }

    /// The map behind a handle.
    ///
    /// A handle from another cache falls back to the empty sentinel rather
    /// than panicking.
    pub fn map(&self, id: MapId) -> &ActionMap {
        self.maps.get(id.idx()).unwrap_or(&self.maps[0])
    }

    /// Number of distinct raw strings interned so far.
    pub fn interned_len(&self) -> usize {
        self.by_raw.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_intern_returns_identical_handle() {
        let mut cache = ActionCache::new();
        let a = cache.intern("click:open;mouseover:peek");
        let b = cache.intern("click:open;mouseover:peek");
        assert_eq!(a, b);
        assert_eq!(cache.interned_len(), 1);
        // Same handle, same map instance.
        assert_eq!(
            cache.map(a) as *const ActionMap,
            cache.map(b) as *const ActionMap
        );
    }

    #[test]
    fn distinct_raw_strings_get_distinct_handles() {
        let mut cache = ActionCache::new();
        let a = cache.intern("click:open");
        let b = cache.intern("click:close");
        assert_ne!(a, b);
        assert_eq!(cache.map(a).get("click"), Some("open"));
        assert_eq!(cache.map(b).get("click"), Some("close"));
    }

    #[test]
    fn empty_forms_share_the_sentinel() {
        let mut cache = ActionCache::new();
        assert_eq!(cache.intern(""), MapId::EMPTY);
        assert_eq!(cache.intern("   "), MapId::EMPTY);
        assert_eq!(cache.intern(";;"), MapId::EMPTY);
        assert!(cache.map(MapId::EMPTY).is_empty());
    }

    #[test]
    fn effectively_empty_but_nonblank_values_are_still_cached() {
        let mut cache = ActionCache::new();
        // Parses to nothing, but the raw string lookup is recorded so the
        // next sighting skips the parser.
        assert_eq!(cache.intern("click:;"), MapId::EMPTY);
        assert_eq!(cache.interned_len(), 1);
        assert_eq!(cache.intern("click:;"), MapId::EMPTY);
        assert_eq!(cache.interned_len(), 1);
    }

    #[test]
    fn default_event_type_applies_at_parse_time() {
        let mut cache = ActionCache::new();
        let before = cache.intern("open");
        assert_eq!(cache.map(before).get("click"), Some("open"));

        cache.set_default_event_type("tap");
        // A distinct raw string parsed after the change binds the new type.
        let after = cache.intern("shut");
        assert_eq!(cache.map(after).get("tap"), Some("shut"));
        assert_eq!(cache.map(after).get("click"), None);

        // The already-interned map is untouched.
        assert_eq!(cache.map(before).get("click"), Some("open"));
    }

    #[test]
    fn foreign_handles_fall_back_to_the_sentinel() {
        let cache = ActionCache::new();
        let bogus = MapId(999);
        assert!(cache.map(bogus).is_empty());
    }
}
