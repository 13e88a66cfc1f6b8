// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-dispatcher queueing.
//!
//! Events intercepted before a dispatcher attaches are not lost: matched
//! records queue (each owning a copy of its event), and the moment a
//! dispatcher registers it receives the whole backlog as one batch. All
//! later events dispatch live.
//!
//! Run:
//! - `cargo run -p overstory_examples --example contract_queue`

use overstory_actions::names;
use overstory_contract::{Contract, DispatchScope, Dispatcher, EventRecord, RawEvent};
use overstory_dom::{Dom, Element, NodeId, Tag};

struct Printer;

impl Dispatcher<NodeId> for Printer {
    fn dispatch(&mut self, records: &[EventRecord<NodeId>], scope: DispatchScope) {
        println!("  batch of {} ({scope:?})", records.len());
        for r in records {
            println!("    action={:?} at t={}", r.action, r.time_stamp);
        }
    }
}

fn main() {
    let mut dom = Dom::new();
    let container = dom.insert(None, Element::new(Tag::Div));
    let save = dom.insert(
        Some(container),
        Element::new(Tag::Button).with_attribute("jsaction", "doc.save"),
    );
    let share = dom.insert(
        Some(container),
        Element::new(Tag::Button).with_attribute("jsaction", "doc.share"),
    );

    let mut contract: Contract<NodeId> = Contract::new();
    contract.add_event(names::CLICK);
    contract.add_container(&dom, container);

    // Two clicks land while the application is still booting.
    for (button, t) in [(save, 10), (share, 20)] {
        let mut ev = RawEvent {
            time_stamp: t,
            ..RawEvent::new(names::CLICK, button)
        };
        contract.deliver(&dom, &mut ev);
    }
    println!(
        "queued before attach: {}",
        contract.queued().map_or(0, <[_]>::len)
    );

    // The dispatcher drains the backlog once, then goes live.
    println!("== attach ==");
    contract.dispatch_to(Box::new(Printer));

    println!("== live click ==");
    let mut ev = RawEvent {
        time_stamp: 30,
        ..RawEvent::new(names::CLICK, save)
    };
    contract.deliver(&dom, &mut ev);
}
