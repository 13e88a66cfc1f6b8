// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute string parsing.
//!
//! ## Overview
//!
//! Splits an attribute value into `;`-separated clauses and each clause on
//! its first `:`. A clause without a colon binds the supplied default event
//! type. Whitespace around clauses and around the colon is ignored, empty
//! clauses are skipped, and a clause with an empty type or action is dropped
//! without affecting its neighbors — the parser never fails.

use crate::map::ActionMap;

/// Parse one raw attribute value into an [`ActionMap`].
///
/// `default_event_type` is bound by clauses that name only an action
/// (`"open"` rather than `"click:open"`). Duplicate event types within one
/// attribute resolve last-wins.
pub fn parse_attribute(raw: &str, default_event_type: &str) -> ActionMap {
    let mut map = ActionMap::new();
    for clause in raw.split(';') {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }
        match clause.split_once(':') {
            Some((event_type, action)) => {
                let event_type = event_type.trim();
                let action = action.trim();
                if event_type.is_empty() || action.is_empty() {
                    continue;
                }
                map.set(event_type, action);
            }
            None => map.set(default_event_type, clause),
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn parse(raw: &str) -> ActionMap {
        parse_attribute(raw, "click")
    }

    #[test]
    fn canonical_two_clause_form() {
        let m = parse("a:x;b:y");
        assert_eq!(m.get("a"), Some("x"));
        assert_eq!(m.get("b"), Some("y"));
        assert_eq!(m.len(), 2, "no other keys");
    }

    #[test]
    fn bare_action_binds_default_event_type() {
        let m = parse("open");
        assert_eq!(m.get("click"), Some("open"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn default_event_type_is_caller_supplied() {
        let m = parse_attribute("open", "tap");
        assert_eq!(m.get("tap"), Some("open"));
        assert_eq!(m.get("click"), None);
    }

    #[test]
    fn duplicate_event_type_last_wins() {
        let m = parse("click:first;click:second");
        assert_eq!(m.get("click"), Some("second"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn whitespace_is_trimmed_everywhere() {
        let m = parse("  click : open ;  mouseover:peek  ");
        assert_eq!(m.get("click"), Some("open"));
        assert_eq!(m.get("mouseover"), Some("peek"));
    }

    #[test]
    fn trailing_semicolon_and_empty_clauses_are_skipped() {
        let m = parse("click:open;;;");
        assert_eq!(m.get("click"), Some("open"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn empty_and_whitespace_only_attributes_yield_empty_maps() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
        assert!(parse(" ; ; ").is_empty());
    }

    #[test]
    fn malformed_clauses_are_dropped_silently() {
        // Missing action, missing type: the bad clause disappears, the good
        // clause still parses.
        let m = parse("click:;ok:fine;:dangling");
        assert_eq!(m.get("ok"), Some("fine"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn qualified_action_names_pass_through_untouched() {
        let m = parse("click:menu.open");
        assert_eq!(m.get("click"), Some("menu.open"));
    }

    #[test]
    fn clause_order_is_preserved() {
        let m = parse("a:x;b:y;c:z");
        let keys: Vec<_> = m.iter().map(|(t, _)| t).collect();
        assert_eq!(keys, alloc::vec!["a", "b", "c"]);
    }
}
