use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use wb_ostree::WbTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insertion ──────────────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("WbTreeSet", N), |b| {
        b.iter(|| {
            let mut set = WbTreeSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("WbTreeSet", N), |b| {
        b.iter(|| {
            let mut set = WbTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

// ─── Removal ────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_random");
    let keys = random_keys(N);

    group.bench_function(BenchmarkId::new("WbTreeSet", N), |b| {
        let full: WbTreeSet<i64> = keys.iter().copied().collect();
        b.iter(|| {
            let mut set = full.clone();
            for k in &keys {
                set.remove(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        let full: BTreeSet<i64> = keys.iter().copied().collect();
        b.iter(|| {
            let mut set = full.clone();
            for k in &keys {
                set.remove(k);
            }
            set
        });
    });

    group.finish();
}

// ─── Order-statistic queries ────────────────────────────────────────────────

fn bench_order_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_statistics");
    let set: WbTreeSet<i64> = random_keys(N).into_iter().collect();
    let n = set.len();

    group.bench_function(BenchmarkId::new("get_ith", N), |b| {
        b.iter(|| {
            let mut acc = 0i64;
            for i in 1..=n {
                acc = acc.wrapping_add(*set.get_ith(i).unwrap());
            }
            acc
        });
    });

    group.bench_function(BenchmarkId::new("position_of", N), |b| {
        let values = set.to_vec();
        b.iter(|| {
            let mut acc = 0usize;
            for v in &values {
                acc = acc.wrapping_add(set.position_of(v).unwrap());
            }
            acc
        });
    });

    group.bench_function(BenchmarkId::new("num_range", N), |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for step in 0..1_000i64 {
                acc = acc.wrapping_add(set.num_range(&(step * 1_000), &(step * 2_000)));
            }
            acc
        });
    });

    group.finish();
}

// ─── Bulk construction ──────────────────────────────────────────────────────

fn bench_from_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_sorted");
    let keys = ordered_keys(N);

    group.bench_function(BenchmarkId::new("from_sorted_vec", N), |b| {
        b.iter(|| WbTreeSet::from_sorted_vec(keys.clone()));
    });

    group.bench_function(BenchmarkId::new("insert_loop", N), |b| {
        b.iter(|| {
            let mut set = WbTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_random,
    bench_remove_random,
    bench_order_statistics,
    bench_from_sorted
);
criterion_main!(benches);
