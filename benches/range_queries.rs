use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
// Looking to measure set implementation, not hasher performance so using a faster hasher
use fnv::FnvHashSet as HashSet;

use ordtree::OrderedTree;

// Generates a key for the set
//
// Note that the keys returned are not guaranteed to be unique, but will be
// largely unique.
fn make_key(i: i64) -> i64 {
    // Make sure i >= 0
    let i = i.max(0);

    // Spread keys out so we generate interesting trees. Strictly increasing
    // keys would degrade the unbalanced tree to a linked list and measure the
    // worst case only.
    let sign = if i % 3 >= 1 { 1 } else { -1 };

    let divisor = match i % 6 {
        0 | 1 => 1,
        2 | 4 => 3,
        3 | 5 => 6,
        _ => unreachable!(),
    };

    sign * (i + 1) * 4 / divisor
}

fn keys(count: usize) -> Vec<i64> {
    (0..count).map(|i| make_key(i as i64)).collect()
}

/// Bounds that slide across the key space so each iteration queries a
/// different window of roughly the same width
fn bounds(i: i64, width: i64) -> (i64, i64) {
    let lo = make_key(i).min(make_key(i + width));
    (lo, lo + width * 4)
}

/// Sums the keys of an in-range query driven by successor walks
fn tree_range_sum(tree: &OrderedTree<i64>, lo: i64, hi: i64) -> i64 {
    tree.range_search(&lo, &hi).map(|node| *node.key()).sum()
}

/// Sums the keys of an in-range query on the standard B-tree
fn btree_range_sum(set: &BTreeSet<i64>, lo: i64, hi: i64) -> i64 {
    set.range(lo..=hi).sum()
}

/// A hash set has no key order, so an "in range" query has to visit every
/// element. This is the baseline the linked tree is supposed to beat.
fn hash_range_sum(set: &HashSet<i64>, lo: i64, hi: i64) -> i64 {
    set.iter().filter(|&&key| lo <= key && key <= hi).sum()
}

pub fn bench_range_queries(c: &mut Criterion) {
    const SIZES: &[usize] = &[100, 1000, 10000];
    const QUERIES: i64 = 50;
    const WIDTH: i64 = 16;

    let mut group = c.benchmark_group("range query");
    for &size in SIZES {
        let keys = keys(size);

        let tree: OrderedTree<i64> = keys.iter().copied().collect();
        let btree: BTreeSet<i64> = keys.iter().copied().collect();
        let hash: HashSet<i64> = keys.iter().copied().collect();

        group.bench_with_input(BenchmarkId::new("OrderedTree", size), &size, |b, _| {
            b.iter(|| {
                for i in 0..QUERIES {
                    let (lo, hi) = bounds(i, WIDTH);
                    black_box(tree_range_sum(&tree, lo, hi));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |b, _| {
            b.iter(|| {
                for i in 0..QUERIES {
                    let (lo, hi) = bounds(i, WIDTH);
                    black_box(btree_range_sum(&btree, lo, hi));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("HashSet (full scan)", size), &size, |b, _| {
            b.iter(|| {
                for i in 0..QUERIES {
                    let (lo, hi) = bounds(i, WIDTH);
                    black_box(hash_range_sum(&hash, lo, hi));
                }
            })
        });
    }
    group.finish();
}

pub fn bench_successor_walks(c: &mut Criterion) {
    const SIZES: &[usize] = &[100, 1000, 10000];

    let mut group = c.benchmark_group("full in-order walk");
    for &size in SIZES {
        let keys = keys(size);

        let tree: OrderedTree<i64> = keys.iter().copied().collect();
        let btree: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_with_input(BenchmarkId::new("OrderedTree", size), &size, |b, _| {
            b.iter(|| black_box(tree.iter_inorder().sum::<i64>()))
        });
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |b, _| {
            b.iter(|| black_box(btree.iter().sum::<i64>()))
        });
    }
    group.finish();
}

criterion_group!(benches,
    bench_range_queries,
    bench_successor_walks,
);

criterion_main!(benches);
