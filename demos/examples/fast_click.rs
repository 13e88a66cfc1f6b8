// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fast clicks from touch sequences.
//!
//! With fast clicks enabled, a `touchstart`/`touchend` pair on a
//! click-bound element synthesizes an immediate click instead of waiting
//! out the host's tap delay, and the emulated mouse cascade that follows is
//! swallowed so the action runs exactly once.
//!
//! Run:
//! - `cargo run -p overstory_examples --example fast_click`

use kurbo::Point;
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
                println!(
                    "  matched {} → {:?} (synthetic: {})",
                    r.event_type, r.action, r.event.synthetic_click
                );
            }
        }
    }
}

fn main() {
    let mut dom = Dom::new();
    let container = dom.insert(None, Element::new(Tag::Div));
    let card = dom.insert(
        Some(container),
        Element::new(Tag::Div).with_attribute("jsaction", "click:card.open"),
    );

    let settings = ContractSettings {
        flags: ContractFlags::STOP_PROPAGATION | ContractFlags::FAST_CLICK,
        ..ContractSettings::default()
    };
    let mut contract: Contract<NodeId> = Contract::with_settings(settings);
    contract.add_event(names::CLICK);
    contract.add_container(&dom, container);
    contract.dispatch_to(Box::new(Printer));

    println!("== tap ==");
    let mut start = RawEvent {
        point: Point::new(100.0, 100.0),
        time_stamp: 1_000,
        ..RawEvent::new(names::TOUCHSTART, card)
    };
    contract.deliver(&dom, &mut start);

    let mut end = RawEvent {
        point: Point::new(101.0, 101.0),
        time_stamp: 1_050,
        ..RawEvent::new(names::TOUCHEND, card)
    };
    let effects = contract.deliver(&dom, &mut end);
    println!("  host effects: {effects:?}");

    println!("== emulated cascade (suppressed) ==");
    for (ty, t) in [
        (names::MOUSEDOWN, 1_300),
        (names::MOUSEUP, 1_310),
        (names::CLICK, 1_320),
    ] {
        let mut ev = RawEvent {
            point: Point::new(100.0, 100.0),
            time_stamp: t,
            ..RawEvent::new(ty, card)
        };
        contract.deliver(&dom, &mut ev);
        println!("  {ty}: stopped = {}", ev.propagation_stopped);
    }
}
