// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_dom --heading-base-level=0

//! Overstory DOM: a minimal element tree.
//!
//! Overstory DOM is the substrate the event-delegation contract walks. It is
//! not an HTML engine — no parsing, no layout, no styling. It represents just
//! what delegation needs:
//!
//! - A hierarchy of tagged elements with string attributes.
//! - Stable, copyable [`NodeId`](crate::types::NodeId) handles backed by a
//!   generational slot arena, so removed nodes can never be confused with
//!   their slot's next tenant.
//! - An optional per-element *owner* link: a logical re-parenting edge that
//!   ancestor walks follow in preference to the structural parent (shadowed
//!   ownership, detached overlays anchored to a logical host).
//!
//! Hosts that already have a DOM can ignore this crate and implement the
//! contract's lookup trait over their own node handles; this tree exists for
//! examples, tests, and hosts that want a ready-made substrate.
//!
//! ## Example
//!
//! ```rust
//! use overstory_dom::{Dom, Element, Tag};
//!
//! let mut dom = Dom::new();
//! let root = dom.insert(None, Element::new(Tag::Div));
//! let item = dom.insert(
//!     Some(root),
//!     Element::new(Tag::A).with_attribute("jsaction", "click:open"),
//! );
//!
//! assert_eq!(dom.parent(item), Some(root));
//! assert_eq!(dom.attribute(item, "jsaction"), Some("click:open"));
//! assert!(dom.contains(root, item));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod tree;
pub mod types;

pub use tree::Dom;
pub use types::{Element, NodeId, Tag};
