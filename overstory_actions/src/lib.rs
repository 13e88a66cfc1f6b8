// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_actions --heading-base-level=0

//! Overstory Actions: the action attribute grammar and its caches.
//!
//! Overstory Actions is the string side of the Overstory event-delegation
//! contract. Elements declare named actions in a `jsaction`-style attribute
//! (`"click:menu.open; mouseover:menu.peek"`), and this crate turns those raw
//! attribute strings into [`ActionMap`](crate::map::ActionMap) values — one
//! action per event type, last clause wins.
//!
//! - Parse attribute strings with the grammar below; malformed clauses are
//!   dropped silently, never reported.
//! - Intern parsed maps in an [`ActionCache`](crate::cache::ActionCache) so
//!   that repeated attribute values (the common case in list-shaped DOMs) are
//!   parsed once and shared by handle.
//! - Attribute-less elements all share one immutable empty sentinel map,
//!   [`MapId::EMPTY`](crate::cache::MapId::EMPTY).
//!
//! ## Grammar
//!
//! ```text
//! attr   := clause (';' clause)* ';'?
//! clause := (event-type ':')? action-name        -- whitespace trimmed
//! ```
//!
//! A clause without an event type binds the cache's *default event type*,
//! which starts as `"click"` and can be changed per cache.
//!
//! ## Example
//!
//! ```rust
//! use overstory_actions::cache::ActionCache;
//!
//! let mut cache = ActionCache::new();
//! let id = cache.intern("open; mouseover : peek ;");
//! let map = cache.map(id);
//! assert_eq!(map.get("click"), Some("open"));
//! assert_eq!(map.get("mouseover"), Some("peek"));
//!
//! // Interning is by raw string identity: a repeated attribute value costs
//! // one lookup, and both elements share the same map.
//! assert_eq!(cache.intern("open; mouseover : peek ;"), id);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cache;
pub mod map;
pub mod names;
pub mod parse;

pub use cache::{ActionCache, MapId};
pub use map::ActionMap;
