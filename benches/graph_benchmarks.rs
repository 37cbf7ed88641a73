use coocgraph::algo::{build_view, chain_between, chain_lengths_from, partition};
use coocgraph::graph::{CoocStore, Entity};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use indexmap::IndexMap;

/// Clustered graph: `size` entities in groups of 20, each entity linked to the
/// next three in its group and every tenth group bridged to the next one.
fn build_store(size: usize) -> CoocStore {
    let mut store = CoocStore::new();
    let entity = |i: usize| Entity::new("people", &format!("Person{}", i));

    for i in 0..size {
        let group_end = (i / 20 + 1) * 20;
        let last = (i + 4).min(group_end).min(size);
        let mut partners: Vec<Entity> = (i + 1..last).map(entity).collect();
        if i % 200 == 0 && group_end < size {
            partners.push(entity(group_end));
        }

        let mut counts = IndexMap::new();
        counts.insert(entity(i), 1);
        let mut coocs = IndexMap::new();
        coocs.insert(entity(i), partners);
        store.merge_facets(&counts, &coocs);
    }
    store
}

/// Benchmark merging facets into the store
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_facets");

    for size in [100, 1000, 5000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(build_store(size)));
        });
    }
    group.finish();
}

/// Benchmark island partitioning
fn bench_islands(c: &mut Criterion) {
    let mut group = c.benchmark_group("islands");

    for size in [100, 1000, 5000].iter() {
        let store = build_store(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(partition(store).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark chain search and layering within the first island
fn bench_queries(c: &mut Criterion) {
    let store = build_store(1000);
    let view = build_view(&store);
    let islands = partition(&store).unwrap();
    let source = Entity::new("people", "Person0");
    let target = Entity::new("people", "Person19");

    c.bench_function("chain_between", |b| {
        b.iter(|| black_box(chain_between(&store, &view, &islands, &source, &target)));
    });

    c.bench_function("chain_lengths_from", |b| {
        b.iter(|| black_box(chain_lengths_from(&store, &view, &source)));
    });
}

criterion_group!(benches, bench_merge, bench_islands, bench_queries);
criterion_main!(benches);
