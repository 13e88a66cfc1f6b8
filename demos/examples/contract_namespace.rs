// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespace qualification.
//!
//! A `jsnamespace` attribute on an ancestor qualifies the bare action names
//! of its subtree, so list items can declare `select` and resolve to
//! `menu.select` or `toolbar.select` depending on where they sit.
//!
//! Run:
//! - `cargo run -p overstory_examples --example contract_namespace`

use overstory_actions::names;
use overstory_contract::{
    Contract, ContractFlags, ContractSettings, DispatchScope, Dispatcher, EventRecord, RawEvent,
};
use overstory_dom::{Dom, Element, NodeId, Tag};

struct Printer;

impl Dispatcher<NodeId> for Printer {
    fn dispatch(&mut self, records: &[EventRecord<NodeId>], scope: DispatchScope) {
        for r in records {
            if scope == DispatchScope::Matched {
                println!("  resolved action = {:?}", r.action);
            }
        }
    }
}

fn main() {
    let mut dom = Dom::new();
    let container = dom.insert(None, Element::new(Tag::Div));
    let menu = dom.insert(
        Some(container),
        Element::new(Tag::Div).with_attribute("jsnamespace", "menu"),
    );
    let item = dom.insert(
        Some(menu),
        Element::new(Tag::Div).with_attribute("jsaction", "select"),
    );
    let global_item = dom.insert(
        Some(container),
        Element::new(Tag::Div).with_attribute("jsaction", "select"),
    );

    let settings = ContractSettings {
        flags: ContractFlags::STOP_PROPAGATION | ContractFlags::NAMESPACES,
        ..ContractSettings::default()
    };
    let mut contract: Contract<NodeId> = Contract::with_settings(settings);
    contract.add_event(names::CLICK);
    contract.add_container(&dom, container);
    contract.dispatch_to(Box::new(Printer));

    println!("== click inside the menu ==");
    contract.deliver(&dom, &mut RawEvent::new(names::CLICK, item));

    println!("== click outside any namespace ==");
    contract.deliver(&dom, &mut RawEvent::new(names::CLICK, global_item));
}
