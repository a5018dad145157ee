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

//! Catalogue item payload
//!
//! [`StockItem`] is the value stored under a SKU in the catalogue tree.
//! The SKU itself is the tree key and deliberately not a field here, so
//! no mutable handle to an item can move it in the ordering.

/// Fixed per-item shelf ceiling; restocking clamps to this many units.
pub const MAX_STOCK: u32 = 1_000;

/// One catalogue entry: description, unit sale price, and shelf count.
///
/// New items start with an empty shelf; stock arrives through restocking.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    description: String,
    price: f64,
    stock: u32,
}

impl StockItem {
    /// Create an item with zero stock.
    pub fn new(description: impl Into<String>, price: f64) -> Self {
        Self {
            description: description.into(),
            price,
            stock: 0,
        }
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit sale price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units currently on the shelf.
    #[inline]
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Units the shelf can still take before hitting [`MAX_STOCK`].
    #[inline]
    pub fn shelf_space(&self) -> u32 {
        MAX_STOCK - self.stock
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }

    pub fn set_stock(&mut self, stock: u32) {
        debug_assert!(stock <= MAX_STOCK);
        self.stock = stock;
    }
}
