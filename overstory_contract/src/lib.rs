// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_contract --heading-base-level=0

//! Overstory Contract: delegated event interception for declarative actions.
//!
//! ## Overview
//!
//! Instead of attaching a listener to every interactive element, elements
//! declare named actions in a `jsaction`-style attribute and a single
//! delegated handler per *container* intercepts events in the bubbling
//! phase. The contract resolves the first ancestor whose declared actions
//! match the event's semantic type and surfaces a structured
//! [`EventRecord`](crate::types::EventRecord) to an external
//! [`Dispatcher`](crate::types::Dispatcher). Until a dispatcher attaches,
//! matched records queue; on attach the backlog is delivered once, as a
//! batch. The contract never executes actions itself.
//!
//! ## Inputs
//!
//! The host owns the element tree and the event source. It exposes the tree
//! through [`DomLookup`](crate::types::DomLookup) (or uses the
//! [`overstory_dom`] adapter) and feeds each event to
//! [`Contract::deliver`](crate::contract::Contract::deliver) as a
//! [`RawEvent`](crate::types::RawEvent) — a plain owned value standing in
//! for the browser's event object.
//!
//! ## Semantics highlights
//!
//! - Modified clicks classify as `clickmod` and fall through to the host's
//!   native behavior.
//! - With accessibility clicks enabled, Enter/Space activate `click`
//!   bindings (`clickonly` opts out).
//! - With fast clicks enabled, a touch tap synthesizes an immediate click
//!   and the emulated mouse cascade is swept.
//! - Nested containers are collapsed when stop-propagation is off, so no
//!   event dispatches twice.
//!
//! ## Example
//!
//! ```rust
//! use overstory_actions::names;
//! use overstory_contract::contract::Contract;
//! use overstory_contract::types::{DispatchScope, Dispatcher, EventRecord, RawEvent};
//! use overstory_dom::{Dom, Element, Tag};
//!
//! struct Printer;
//! impl Dispatcher<overstory_dom::NodeId> for Printer {
//!     fn dispatch(&mut self, records: &[EventRecord<overstory_dom::NodeId>], _: DispatchScope) {
//!         for r in records {
//!             if let Some(action) = &r.action {
//!                 println!("run {action}");
//!             }
//!         }
//!     }
//! }
//!
//! let mut dom = Dom::new();
//! let root = dom.insert(None, Element::new(Tag::Div));
//! let button = dom.insert(
//!     Some(root),
//!     Element::new(Tag::Button).with_attribute("jsaction", "click:menu.open"),
//! );
//!
//! let mut contract: Contract<overstory_dom::NodeId> = Contract::new();
//! contract.add_event(names::CLICK);
//! contract.add_container(&dom, root);
//! contract.dispatch_to(Box::new(Printer));
//!
//! let mut click = RawEvent::new(names::CLICK, button);
//! contract.deliver(&dom, &mut click);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod classify;
pub mod containers;
pub mod contract;
pub mod fast_click;
mod namespace;
pub mod types;
mod walker;

pub use containers::{ContainerId, InstalledListener, ListenerId};
pub use contract::{Contract, HandlerRef};
pub use fast_click::FastClick;
pub use types::{
    ContractFlags, ContractSettings, CustomDetail, DispatchScope, Dispatcher, DomLookup,
    EventRecord, FastClickTuning, HostEffects, Modifiers, Quirks, RawEvent,
};
