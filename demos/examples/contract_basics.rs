// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract basics.
//!
//! This minimal example declares an action in a `jsaction` attribute,
//! registers one container, and delivers a click: the contract resolves the
//! first matching ancestor and hands a record to the dispatcher.
//!
//! Run:
//! - `cargo run -p overstory_examples --example contract_basics`

use overstory_actions::names;
use overstory_contract::{Contract, DispatchScope, Dispatcher, EventRecord, Modifiers, RawEvent};
use overstory_dom::{Dom, Element, NodeId, Tag};

struct Printer;

impl Dispatcher<NodeId> for Printer {
    fn dispatch(&mut self, records: &[EventRecord<NodeId>], scope: DispatchScope) {
        for r in records {
            println!(
                "  {scope:?}  type={}  action={:?}  element={:?}",
                r.event_type, r.action, r.action_element
            );
        }
    }
}

fn main() {
    let mut dom = Dom::new();
    let container = dom.insert(None, Element::new(Tag::Div));
    let row = dom.insert(
        Some(container),
        Element::new(Tag::Div).with_attribute("jsaction", "click:row.select; mouseover:row.peek"),
    );
    let label = dom.insert(Some(row), Element::new(Tag::Span));

    let mut contract: Contract<NodeId> = Contract::new();
    contract.add_event(names::CLICK);
    contract.add_container(&dom, container);
    contract.dispatch_to(Box::new(Printer));

    // A click on the label bubbles to the row, which binds the action.
    println!("== click on the label ==");
    let mut click = RawEvent::new(names::CLICK, label);
    contract.deliver(&dom, &mut click);

    // A ctrl-click classifies as clickmod and matches nothing, so the
    // host's native behavior is preserved.
    println!("== ctrl-click on the label ==");
    let mut modified = RawEvent {
        modifiers: Modifiers::CTRL,
        ..RawEvent::new(names::CLICK, label)
    };
    contract.deliver(&dom, &mut modified);
    println!("  default_prevented = {}", modified.default_prevented);
}
