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

//! Store-level operations
//!
//! This module provides the front door of the crate:
//!
//! - [`Inventory`] - Cash ledger plus the SKU-keyed catalogue
//! - [`OPENING_BALANCE`] - Cash on hand when a store opens

pub mod inventory;

// Re-export main types
pub use inventory::{Inventory, OPENING_BALANCE};
