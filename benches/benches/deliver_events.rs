// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use overstory_actions::names;
use overstory_contract::{
    Contract, ContractFlags, ContractSettings, DispatchScope, Dispatcher, EventRecord, RawEvent,
};
use overstory_dom::{Dom, Element, NodeId, Tag};

/// Counts records instead of printing them.
struct Sink(u64);

impl Dispatcher<NodeId> for Sink {
    fn dispatch(&mut self, records: &[EventRecord<NodeId>], _scope: DispatchScope) {
        self.0 += records.len() as u64;
    }
}

/// A chain of `depth` nested divs under one container, with the click
/// binding at the top — the worst case for the ancestor walk.
fn deep_dom(depth: usize) -> (Dom, NodeId, NodeId) {
    let mut dom = Dom::new();
    let container = dom.insert(None, Element::new(Tag::Div));
    let bound = dom.insert(
        Some(container),
        Element::new(Tag::Div).with_attribute("jsaction", "click:deep.select"),
    );
    let mut cur = bound;
    for _ in 0..depth {
        cur = dom.insert(Some(cur), Element::new(Tag::Div));
    }
    (dom, container, cur)
}

fn bench_deliver(c: &mut Criterion) {
    let mut group = c.benchmark_group("deliver_events");

    for depth in [4_usize, 16, 64] {
        let (dom, container, leaf) = deep_dom(depth);
        let mut contract: Contract<NodeId> = Contract::new();
        contract.add_event(names::CLICK);
        contract.add_container(&dom, container);
        contract.dispatch_to(Box::new(Sink(0)));

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("click_depth_{depth}"), |b| {
            b.iter(|| {
                let mut ev = RawEvent::new(names::CLICK, black_box(leaf));
                contract.deliver(&dom, &mut ev);
                black_box(ev.propagation_stopped)
            });
        });
    }

    // Namespace qualification costs one extra walk per element on first
    // sight only; the warm path is what delivery pays.
    let (mut dom, container, leaf) = deep_dom(16);
    dom.set_attribute(container, "jsnamespace", "bench");
    let settings = ContractSettings {
        flags: ContractFlags::STOP_PROPAGATION | ContractFlags::NAMESPACES,
        ..ContractSettings::default()
    };
    let mut contract: Contract<NodeId> = Contract::with_settings(settings);
    contract.add_event(names::CLICK);
    contract.add_container(&dom, container);
    contract.dispatch_to(Box::new(Sink(0)));

    group.bench_function("click_depth_16_namespaced", |b| {
        b.iter(|| {
            let mut ev = RawEvent::new(names::CLICK, black_box(leaf));
            contract.deliver(&dom, &mut ev);
            black_box(ev.propagation_stopped)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_deliver);
criterion_main!(benches);
