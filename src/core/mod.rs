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

//! Core types for Stockyard
//!
//! This module contains the fundamental types shared across the crate:
//!
//! - [`Error`] and [`Result`] - Catalogue and ledger error handling
//! - [`StockItem`] - The per-SKU catalogue payload
//! - [`MAX_STOCK`] - The fixed per-item shelf ceiling

pub mod error;
pub mod item;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use item::{StockItem, MAX_STOCK};
