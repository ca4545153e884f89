//! Benchmark for ComparatorOrderedSet vs standard BTreeSet.
//!
//! Measures the cost of comparator dispatch and of the persistent tree
//! against Rust's standard BTreeSet for common operations.

use comparator_set::comparator::{ComparatorExt, Identified, NaturalOrder, by_identity, comparing};
use comparator_set::ordered::ComparatorOrderedSet;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("ComparatorOrderedSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = ComparatorOrderedSet::new(NaturalOrder);
                    for index in 0..size {
                        set.insert(black_box(index));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = BTreeSet::new();
                for index in 0..size {
                    set.insert(black_box(index));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Collision Benchmark
// =============================================================================

fn benchmark_collisions(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("collisions");

    for size in [100, 1000, 10000] {
        // Every element after the first 16 collides with a stored one.
        group.bench_with_input(
            BenchmarkId::new("KeyComparator", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = ComparatorOrderedSet::new(comparing(|value: &i32| value % 16));
                    black_box(set.insert_all((0..size).map(black_box)))
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("KeyComparator+ByIdentity", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = ComparatorOrderedSet::new(
                        comparing(|value: &Identified<i32>| **value % 16).then_by(by_identity()),
                    );
                    black_box(set.insert_all((0..size).map(Identified::new)))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in [100, 1000, 10000] {
        let comparator_set: ComparatorOrderedSet<i32, NaturalOrder> = (0..size).collect();
        let standard_set: BTreeSet<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("ComparatorOrderedSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    (0..size)
                        .filter(|value| comparator_set.contains(&black_box(*value)))
                        .count()
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                (0..size)
                    .filter(|value| standard_set.contains(&black_box(*value)))
                    .count()
            });
        });
    }

    group.finish();
}

// =============================================================================
// iter Benchmark
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in [100, 1000, 10000] {
        let comparator_set: ComparatorOrderedSet<i32, NaturalOrder> = (0..size).collect();
        let standard_set: BTreeSet<i32> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("ComparatorOrderedSet", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(comparator_set.iter().copied().sum::<i32>()));
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_set.iter().copied().sum::<i32>()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_collisions,
    benchmark_contains,
    benchmark_iter
);
criterion_main!(benches);
