//! # Equip Benchmarks
//!
//! Cost of the equip hook and of captures against stores of growing size.
//!
//! Run with: `cargo bench -p clanskin-core`

use clanskin_core::{
    Actor, AllowAll, ExcludedKinds, GroupId, ItemKind, ItemSnapshot, ProfileStore, SkinEngine,
    VariantId, capture_from,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const KINDS: [&str; 6] = ["hoodie", "pants", "shoes.boots", "jacket", "mask.bandana", "burlap.gloves"];

/// Create a store with N enforcing groups, each with every kind saved.
fn create_store(groups: usize) -> ProfileStore {
    let mut store = ProfileStore::new();
    for g in 0..groups {
        let profile = store.ensure(&GroupId::new(g.to_string()));
        for (i, kind) in KINDS.iter().enumerate() {
            profile.set_variant(ItemKind::new(*kind), VariantId((g * 10 + i) as u64));
        }
        profile.edit_mode = false;
    }
    store
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_on_equip(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_equip");

    for size in [10, 1000, 100_000].iter() {
        let engine = SkinEngine::new(create_store(*size), ExcludedKinds::default())
            .with_permissions(AllowAll);
        let actor = Actor::new("player").in_team((size / 2).to_string());

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut item = ItemSnapshot::new("hoodie", true, 0);
                black_box(engine.on_equip(&actor, &mut item))
            });
        });
    }

    group.finish();
}

fn bench_capture(c: &mut Criterion) {
    let worn: Vec<ItemSnapshot> = KINDS
        .iter()
        .enumerate()
        .map(|(i, kind)| ItemSnapshot::new(*kind, true, i as u64))
        .collect();
    let excluded = ExcludedKinds::default();

    c.bench_function("capture_full_outfit", |b| {
        b.iter(|| {
            let mut store = ProfileStore::new();
            black_box(capture_from(&mut store, &GroupId::new("G1"), &worn, &excluded))
        });
    });
}

criterion_group!(benches, bench_on_equip, bench_capture);
criterion_main!(benches);
