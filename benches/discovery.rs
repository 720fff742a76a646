use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tweaklab::laboratory::{self, ZEROS_OBJECT_IS};
use tweaklab::{discover_all, explore, live_view, LabConfig, SelectionStore};

fn bench_discovery(c: &mut Criterion) {
    let catalogue = laboratory::catalogue().unwrap();
    let tweakables = catalogue.tweakables().count() as u64;

    let mut group = c.benchmark_group("discovery");
    group.throughput(Throughput::Elements(tweakables));
    group.bench_function("discover_all", |b| b.iter(|| discover_all(&catalogue)));
    group.finish();

    c.bench_function("explore/zeros_object_is", |b| {
        b.iter(|| explore(&catalogue, ZEROS_OBJECT_IS));
    });
}

fn bench_live(c: &mut Criterion) {
    let catalogue = Arc::new(laboratory::catalogue().unwrap());
    let mut store = SelectionStore::new(catalogue, &LabConfig::default());
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("live/shuffle_then_view", |b| {
        b.iter(|| {
            store.shuffle_with(&mut rng);
            live_view(&store)
        });
    });
}

criterion_group!(benches, bench_discovery, bench_live);
criterion_main!(benches);
