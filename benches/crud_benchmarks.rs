use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use order_btree::BTree;
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn filled<const M: usize>(keys: &[i64]) -> BTree<i64, i64, M> {
    keys.iter().map(|&k| (k, k)).collect()
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");
    let keys = ordered_keys(N);

    group.bench_function(BenchmarkId::new("BTree<3>", N), |b| b.iter(|| filled::<3>(&keys)));
    group.bench_function(BenchmarkId::new("BTree<8>", N), |b| b.iter(|| filled::<8>(&keys)));
    group.bench_function(BenchmarkId::new("BTree<64>", N), |b| b.iter(|| filled::<64>(&keys)));
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("BTree<3>", N), |b| b.iter(|| filled::<3>(&keys)));
    group.bench_function(BenchmarkId::new("BTree<8>", N), |b| b.iter(|| filled::<8>(&keys)));
    group.bench_function(BenchmarkId::new("BTree<64>", N), |b| b.iter(|| filled::<64>(&keys)));
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
    });

    group.finish();
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_get_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_random");
    let keys = random_keys(N);
    let tree = filled::<8>(&keys);
    let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    group.bench_function(BenchmarkId::new("BTree<8>", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(tree.get(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(map.get(k));
            }
        });
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("BTree<3>", N), |b| {
        b.iter_batched(
            || filled::<3>(&keys),
            |mut tree| {
                for k in &keys {
                    tree.remove(k);
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTree<8>", N), |b| {
        b.iter_batched(
            || filled::<8>(&keys),
            |mut tree| {
                for k in &keys {
                    tree.remove(k);
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert_ordered, bench_insert_random, bench_get_random, bench_remove_random);
criterion_main!(benches);
