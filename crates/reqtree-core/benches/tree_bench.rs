//! # Tree Benchmarks
//!
//! Performance benchmarks for reqtree-core tree building and checking.
//!
//! Run with: `cargo bench -p reqtree-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reqtree_core::primitives::{OP_AND, OP_EQUAL, OP_GREATER_THAN, OP_NOT, OP_OR};
use reqtree_core::{NoNames, RawCriterion, StatSnapshot, build_tree, check_requirements};
use std::hint::black_box;

/// `r0 r1 AND r2 AND ...`: the conjunction fast path.
fn create_conjunction(size: usize) -> Vec<RawCriterion> {
    let mut criteria = vec![RawCriterion::new(0, 1, OP_GREATER_THAN, 10)];
    for i in 1..size {
        criteria.push(RawCriterion::new(0, i as i64 + 1, OP_GREATER_THAN, 10));
        criteria.push(RawCriterion::sentinel(0, OP_AND));
    }
    criteria
}

/// `(r0 OR r1) AND NOT r2 AND (r3 OR r4) ...`: the stack machine path.
fn create_mixed(size: usize) -> Vec<RawCriterion> {
    let mut criteria = Vec::new();
    for i in 0..size {
        let stat = i as i64 + 1;
        match i % 3 {
            0 => {
                criteria.push(RawCriterion::new(0, stat, OP_EQUAL, 5));
                criteria.push(RawCriterion::new(0, stat, OP_EQUAL, 7));
                criteria.push(RawCriterion::sentinel(0, OP_OR));
            }
            1 => {
                criteria.push(RawCriterion::new(0, stat, OP_EQUAL, 9));
                criteria.push(RawCriterion::sentinel(0, OP_NOT));
            }
            _ => criteria.push(RawCriterion::new(0, stat, OP_GREATER_THAN, 3)),
        }
        if i > 0 {
            criteria.push(RawCriterion::sentinel(0, OP_AND));
        }
    }
    criteria
}

fn create_stats(size: usize) -> StatSnapshot {
    (1..=size as i64).map(|stat| (stat, stat % 11)).collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_build_conjunction(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_conjunction");

    for size in [4, 32, 256].iter() {
        let criteria = create_conjunction(*size);
        let stats = create_stats(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(build_tree(black_box(&criteria), Some(&stats), &NoNames)));
        });
    }

    group.finish();
}

fn bench_build_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_mixed");

    for size in [4, 32, 128].iter() {
        let criteria = create_mixed(*size);
        let stats = create_stats(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(build_tree(black_box(&criteria), Some(&stats), &NoNames)));
        });
    }

    group.finish();
}

fn bench_check_requirements(c: &mut Criterion) {
    let criteria = create_mixed(32);
    let stats = create_stats(32);

    c.bench_function("check_requirements_32", |b| {
        b.iter(|| black_box(check_requirements(black_box(&criteria), &stats, &NoNames)));
    });
}

criterion_group!(
    benches,
    bench_build_conjunction,
    bench_build_mixed,
    bench_check_requirements
);
criterion_main!(benches);
