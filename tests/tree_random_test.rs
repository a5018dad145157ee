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

//! Randomized Red-Black Tree Tests
//!
//! Drives the tree with seeded random workloads and checks every result
//! against a std::collections::BTreeMap oracle, revalidating the red-black
//! invariants as the shape changes.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stockyard::RedBlackTree;

/// Test mixed random operations against a BTreeMap oracle
#[test]
fn test_random_operations_match_btreemap() {
    let mut rng = StdRng::seed_from_u64(0xB1AC4_2ED);
    let mut tree = RedBlackTree::new();
    let mut oracle = BTreeMap::new();

    for step in 0..3000 {
        let key: i32 = rng.random_range(0..400);
        match rng.random_range(0..4) {
            0 | 1 => {
                let value = rng.random_range(-10_000..10_000);
                let was_new = tree.insert(key, value);
                let oracle_new = !oracle.contains_key(&key);
                assert_eq!(
                    was_new, oracle_new,
                    "insert({}) newness mismatch at step {}",
                    key, step
                );
                // Duplicate inserts keep the old value
                oracle.entry(key).or_insert(value);
            }
            2 => {
                let removed = tree.remove(&key);
                let oracle_removed = oracle.remove(&key).is_some();
                assert_eq!(
                    removed, oracle_removed,
                    "remove({}) mismatch at step {}",
                    key, step
                );
            }
            _ => {
                assert_eq!(
                    tree.get(&key),
                    oracle.get(&key),
                    "get({}) mismatch at step {}",
                    key, step
                );
            }
        }

        assert_eq!(tree.len(), oracle.len(), "len mismatch at step {}", step);
        if step % 100 == 0 {
            assert!(tree.is_valid(), "invariants broken at step {}", step);
        }
    }

    assert!(tree.is_valid());

    // Final sweep: full content equality in key order
    let tree_pairs: Vec<(i32, i32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
    let oracle_pairs: Vec<(i32, i32)> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(tree_pairs, oracle_pairs);
}

/// Test a random grow phase followed by a full random drain
#[test]
fn test_random_grow_then_drain() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree = RedBlackTree::new();
    let mut keys = Vec::new();

    while keys.len() < 500 {
        let key: u64 = rng.random_range(0..1_000_000);
        if tree.insert(key, key.wrapping_mul(31)) {
            keys.push(key);
        }
    }
    assert!(tree.is_valid());
    assert_eq!(tree.len(), 500);

    // Remove in a random order unrelated to insertion order
    while !keys.is_empty() {
        let index = rng.random_range(0..keys.len());
        let key = keys.swap_remove(index);
        assert!(tree.remove(&key), "key {} should still be present", key);
        if keys.len() % 50 == 0 {
            assert!(
                tree.is_valid(),
                "invariants broken with {} keys left",
                keys.len()
            );
        }
    }

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert!(tree.is_valid());
}

/// Test that random value overwrites through get_mut track the oracle
#[test]
fn test_random_get_mut_updates() {
    let mut rng = StdRng::seed_from_u64(0xCAFE);
    let mut tree = RedBlackTree::new();
    let mut oracle = BTreeMap::new();

    for _ in 0..300 {
        let key: u16 = rng.random_range(0..100);
        let value: i64 = rng.random_range(-500..500);
        if tree.insert(key, value) {
            oracle.insert(key, value);
        }
    }

    for _ in 0..1000 {
        let key: u16 = rng.random_range(0..100);
        let delta: i64 = rng.random_range(1..10);
        match (tree.get_mut(&key), oracle.get_mut(&key)) {
            (Some(v), Some(o)) => {
                *v += delta;
                *o += delta;
            }
            (None, None) => {}
            (tree_hit, oracle_hit) => panic!(
                "presence mismatch for {}: tree {:?} oracle {:?}",
                key,
                tree_hit.is_some(),
                oracle_hit.is_some()
            ),
        }
    }

    assert!(tree.is_valid());
    for (k, v) in &oracle {
        assert_eq!(tree.get(k), Some(v));
    }
}

/// Test that the height bound holds across many random shapes
#[test]
fn test_random_height_bound() {
    let mut rng = StdRng::seed_from_u64(99);

    for round in 0..10 {
        let mut tree = RedBlackTree::new();
        let target = rng.random_range(100..800);
        let mut live = 0usize;

        while live < target {
            let key: u32 = rng.random_range(0..10_000);
            if rng.random_range(0..5) == 0 {
                if tree.remove(&key) {
                    live -= 1;
                }
            } else if tree.insert(key, ()) {
                live += 1;
            }
        }

        assert!(tree.is_valid(), "round {} produced an invalid tree", round);
        let bound = 2 * ((live + 1) as f64).log2().ceil() as usize;
        assert!(
            tree.height() <= bound,
            "round {}: height {} exceeds bound {} for {} keys",
            round,
            tree.height(),
            bound,
            live
        );
    }
}
