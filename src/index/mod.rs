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

//! Ordered index structures
//!
//! This module provides the keyed storage under the catalogue:
//!
//! - [`Arena`] - Slot-vector node storage with free-list reuse
//! - [`RedBlackTree`] - Arena-backed balanced ordered map
//! - [`LevelEntry`] - Breadth-first snapshot entry for inspection

pub mod arena;
pub mod rbtree;

// Re-export main types
pub use arena::{Arena, NodeId};
pub use rbtree::{Color, Iter, LevelEntry, RedBlackTree};
