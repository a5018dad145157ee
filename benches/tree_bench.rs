// Copyright 2025 Stockyard Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Red-black tree microbenchmarks
//!
//! Run with: cargo bench --bench tree_bench
//!
//! Covers the hot paths of the arena-backed tree: bulk insertion, point
//! lookups, insert/remove churn on a warm arena, and full in-order scans.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use stockyard::RedBlackTree;

const KEY_COUNT: u64 = 10_000;

/// Pseudo-random key sequence, deterministic across runs
fn scrambled_keys(count: u64) -> Vec<u64> {
    // Multiplying by an odd constant permutes the keyspace mod 2^64
    (0..count).map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15)).collect()
}

fn setup_tree(keys: &[u64]) -> RedBlackTree<u64, u64> {
    let mut tree = RedBlackTree::with_capacity(keys.len());
    for &k in keys {
        tree.insert(k, k);
    }
    tree
}

fn bench_bulk_insert(c: &mut Criterion) {
    let keys = scrambled_keys(KEY_COUNT);

    let mut group = c.benchmark_group("bulk_insert");
    group.bench_function("scrambled_10k", |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::with_capacity(keys.len());
            for &k in &keys {
                tree.insert(black_box(k), k);
            }
            black_box(tree.len())
        })
    });
    group.bench_function("ascending_10k", |b| {
        b.iter(|| {
            let mut tree = RedBlackTree::with_capacity(KEY_COUNT as usize);
            for k in 0..KEY_COUNT {
                tree.insert(black_box(k), k);
            }
            black_box(tree.len())
        })
    });
    group.finish();
}

fn bench_point_lookup(c: &mut Criterion) {
    let keys = scrambled_keys(KEY_COUNT);
    let tree = setup_tree(&keys);

    let mut group = c.benchmark_group("point_lookup");
    group.bench_function("hit", |b| {
        let mut i = 0;
        b.iter(|| {
            let key = keys[i % keys.len()];
            i += 1;
            black_box(tree.get(black_box(&key)))
        })
    });
    group.bench_function("miss", |b| {
        // The odd multiplier is injective mod 2^64, so the second half of
        // the sequence never collides with the inserted first half
        let absent = scrambled_keys(2 * KEY_COUNT).split_off(KEY_COUNT as usize);
        let mut i = 0;
        b.iter(|| {
            let key = absent[i % absent.len()];
            i += 1;
            black_box(tree.get(black_box(&key)))
        })
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let keys = scrambled_keys(KEY_COUNT);

    c.bench_function("churn_remove_reinsert", |b| {
        let mut tree = setup_tree(&keys);
        let mut i = 0;
        b.iter(|| {
            // Slot freed by remove is reused by the insert that follows
            let key = keys[i % keys.len()];
            i += 1;
            tree.remove(black_box(&key));
            tree.insert(black_box(key), key);
        })
    });
}

fn bench_in_order_scan(c: &mut Criterion) {
    let keys = scrambled_keys(KEY_COUNT);
    let tree = setup_tree(&keys);

    c.bench_function("in_order_scan_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for (k, _) in tree.iter() {
                sum = sum.wrapping_add(*k);
            }
            black_box(sum)
        })
    });
}

criterion_group!(
    benches,
    bench_bulk_insert,
    bench_point_lookup,
    bench_churn,
    bench_in_order_scan
);
criterion_main!(benches);
