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

//! # Stockyard - Arena-backed red-black tree with a stock-keeping ledger
//!
//! Stockyard is a small inventory engine in pure Rust. Its catalogue sits
//! on an arena-backed red-black tree: nodes live in one slot vector and
//! link through integer ids, so the structure is a single allocation
//! pool with stable handles, cheap deep copies, and no unsafe pointer
//! plumbing.
//!
//! ## Key Features
//!
//! - **Arena storage** - One slot vector, free-list reuse, ids stable across removals
//! - **Red-black balancing** - Height stays within 2 * log2(n + 1) under any workload
//! - **Keyed payloads** - `K: Ord` keys separate from values, so in-place edits can never move an entry
//! - **Structural inspection** - Invariant validator and level-order snapshots instead of raw node access
//! - **Stock ledger** - Balance-tracked restocking and sales with shelf-ceiling clamping
//! - **Interactive CLI** - Catalogue management shell with history and table output
//!
//! ## Quick Start
//!
//! ```rust
//! use stockyard::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! for key in [50, 30, 70, 20, 40, 60, 80] {
//!     tree.insert(key, format!("item-{key}"));
//! }
//!
//! assert_eq!(tree.len(), 7);
//! assert!(tree.is_valid());
//!
//! // ascending key order, always
//! let keys: Vec<i32> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec![20, 30, 40, 50, 60, 70, 80]);
//!
//! tree.remove(&20);
//! tree.remove(&50);
//! assert_eq!(tree.len(), 5);
//! assert!(tree.is_valid());
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`StockItem`], [`Error`])
//! - [`index`] - The arena and the red-black tree ([`RedBlackTree`])
//! - [`store`] - The inventory ledger ([`Inventory`])
//! - [`common`] - Utilities (version)

pub mod common;
pub mod core;
pub mod index;
pub mod store;

// Re-export main types for convenience
pub use core::{Error, Result, StockItem, MAX_STOCK};

// Re-export index types
pub use index::{Color, LevelEntry, NodeId, RedBlackTree};

// Re-export store types
pub use store::{Inventory, OPENING_BALANCE};
