// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event classification: raw host events → semantic event types.
//!
//! ## Overview
//!
//! Several raw event types fold into one semantic type and one raw type
//! splits into several semantic ones. The interesting cases:
//!
//! - A `click` with any modifier (or the middle button) classifies as
//!   `clickmod`, which a plain `click` binding does not match — so the
//!   browser's native modified-click behavior (new tab on ctrl-click)
//!   survives delegation.
//! - With accessibility clicks enabled, Enter/Space keydown on a focusable
//!   non-form element classifies as `clickkey` and is matched against the
//!   element's `click` binding downstream.
//! - Everything else passes through under the handler's own name.
//!
//! The subtree test behind `mouseenter`/`mouseleave` emulation is not
//! classification: it depends on the candidate element and lives in the
//! resolver's walk.

use alloc::string::String;

use overstory_actions::names;

use crate::types::{ContractFlags, DomLookup, RawEvent, KEY_ENTER, KEY_SPACE};

/// A classified event: the semantic type to resolve, plus whether a match
/// must suppress the host default (keyboard activation on scrolling keys and
/// native controls).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Classified {
    pub event_type: String,
    pub prevent_on_match: bool,
}

impl Classified {
    fn plain(event_type: &str) -> Self {
        Self {
            event_type: String::from(event_type),
            prevent_on_match: false,
        }
    }
}

/// Classify `raw` as seen by the handler registered under `name`.
///
/// Answers `None` when the event produces nothing for this handler (a
/// non-activation key under the `click` handler's keydown registration).
pub(crate) fn classify<K, M, D>(
    doc: &D,
    name: &str,
    raw: &RawEvent<K, M>,
    flags: ContractFlags,
) -> Option<Classified>
where
    D: DomLookup<K> + ?Sized,
{
    if name == names::CLICK {
        if raw.event_type == names::CLICK {
            return Some(if raw.is_modified() {
                Classified::plain(names::CLICKMOD)
            } else {
                Classified::plain(names::CLICK)
            });
        }
        if raw.event_type == names::KEYDOWN {
            return classify_action_key(doc, raw, flags);
        }
    }
    Some(Classified::plain(name))
}

fn classify_action_key<K, M, D>(
    doc: &D,
    raw: &RawEvent<K, M>,
    flags: ContractFlags,
) -> Option<Classified>
where
    D: DomLookup<K> + ?Sized,
{
    if !flags.contains(ContractFlags::A11Y_CLICK) {
        return None;
    }
    if raw.key_code != KEY_ENTER && raw.key_code != KEY_SPACE {
        return None;
    }
    if !doc.is_focusable(&raw.target) || doc.is_form_control(&raw.target) {
        return None;
    }
    Some(Classified {
        event_type: String::from(names::CLICKKEY),
        // Space scrolls the page and native controls self-activate; both
        // defaults must not fire when the binding handles the key.
        prevent_on_match: raw.key_code == KEY_SPACE || doc.is_native_control(&raw.target),
    })
}
