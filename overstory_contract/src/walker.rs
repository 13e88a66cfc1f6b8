// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor walking and binding lookup.
//!
//! ## Overview
//!
//! Resolution visits elements from the event target toward the container
//! (exclusive) and stops at the first element whose action map binds the
//! classified event type. Two iteration strategies produce the same
//! semantics:
//!
//! - DOM-parent mode follows each element's owner link when set, otherwise
//!   its structural parent.
//! - Event-path mode iterates the propagation path the event carries
//!   (target first), which is cheaper and correct across composed trees.
//!
//! The resolver is agnostic: both strategies materialize the same bounded
//! chain.

use alloc::vec::Vec;

use overstory_actions::names;
use overstory_actions::ActionMap;

use crate::types::DomLookup;

/// The elements resolution visits: target toward `container`, container
/// excluded. An event on the container itself visits nothing.
pub(crate) fn walk_chain<K, D>(
    doc: &D,
    target: K,
    container: K,
    path: Option<&[K]>,
    use_event_path: bool,
) -> Vec<K>
where
    K: Copy + Eq,
    D: DomLookup<K> + ?Sized,
{
    if use_event_path && let Some(p) = path {
        return p.iter().copied().take_while(|n| *n != container).collect();
    }
    let mut out = Vec::new();
    let mut cur = Some(target);
    while let Some(node) = cur {
        if node == container {
            break;
        }
        out.push(node);
        cur = doc.owner_of(&node).or_else(|| doc.parent_of(&node));
    }
    out
}

/// True if `ancestor` is `node` or a structural ancestor of it.
///
/// Used for the enter/leave subtree test and container-chain computation;
/// owner links are a resolution overlay and deliberately not followed.
pub(crate) fn contains<K, D>(doc: &D, ancestor: K, node: K) -> bool
where
    K: Copy + Eq,
    D: DomLookup<K> + ?Sized,
{
    let mut cur = Some(node);
    while let Some(n) = cur {
        if n == ancestor {
            return true;
        }
        cur = doc.parent_of(&n);
    }
    false
}

/// Look up `event_type` in one element's map, applying the click matching
/// rules.
///
/// Returns the action and, when the match is recorded under a different
/// type than the one queried, that type:
///
/// - `click` falls back to a `clickonly` binding and is recorded as
///   `clickonly` when it does.
/// - `clickkey` matches the `click` binding only — an element that binds
///   just `clickonly` never receives keyboard activation.
/// - Everything else matches its own name.
pub(crate) fn match_binding<'m>(
    map: &'m ActionMap,
    event_type: &str,
) -> Option<(&'m str, Option<&'static str>)> {
    if event_type == names::CLICK {
        if let Some(action) = map.get(names::CLICK) {
            return Some((action, None));
        }
        return map
            .get(names::CLICKONLY)
            .map(|a| (a, Some(names::CLICKONLY)));
    }
    if event_type == names::CLICKKEY {
        return map.get(names::CLICK).map(|a| (a, None));
    }
    map.get(event_type).map(|a| (a, None))
}
