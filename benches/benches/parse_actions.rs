// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use overstory_actions::cache::ActionCache;
use overstory_actions::parse::parse_attribute;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

const EVENT_TYPES: &[&str] = &["click", "mouseover", "mouseout", "keydown", "focus"];
const ACTIONS: &[&str] = &[
    "menu.open",
    "menu.close",
    "row.select",
    "row.expand",
    "card.pin",
    "save",
    "share",
];

/// Attribute values shaped like real markup: one to three clauses, with a
/// deliberately small vocabulary so many strings repeat verbatim.
fn gen_attributes(count: usize, seed: u64) -> Vec<String> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let clauses = 1 + (rng.next_u64() % 3) as usize;
        let mut attr = String::new();
        for i in 0..clauses {
            if i > 0 {
                attr.push(';');
            }
            attr.push_str(rng.pick(EVENT_TYPES));
            attr.push(':');
            attr.push_str(rng.pick(ACTIONS));
        }
        out.push(attr);
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let attrs = gen_attributes(1_000, 0xCAFE_F00D_DEAD_BEEF);

    let mut group = c.benchmark_group("parse_actions");
    group.throughput(Throughput::Elements(attrs.len() as u64));

    group.bench_function("parse_uncached", |b| {
        b.iter(|| {
            for attr in &attrs {
                black_box(parse_attribute(black_box(attr), "click"));
            }
        });
    });

    group.bench_function("intern_cold", |b| {
        b.iter_batched(
            ActionCache::new,
            |mut cache| {
                for attr in &attrs {
                    black_box(cache.intern(black_box(attr)));
                }
                cache
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("intern_warm", |b| {
        let mut cache = ActionCache::new();
        for attr in &attrs {
            cache.intern(attr);
        }
        b.iter(|| {
            for attr in &attrs {
                black_box(cache.intern(black_box(attr)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
