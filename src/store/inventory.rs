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

//! Inventory ledger over the catalogue tree
//!
//! [`Inventory`] pairs a cash balance with a [`RedBlackTree`] of
//! [`StockItem`] records keyed by SKU. Restocking spends from the
//! balance and clamps to the per-item shelf ceiling; selling credits the
//! balance at the catalogue price and clamps to what the shelf holds.

use crate::core::{Error, Result, StockItem};
use crate::index::{LevelEntry, RedBlackTree};

/// Cash on hand when a store opens.
pub const OPENING_BALANCE: f64 = 100_000.0;

/// A store: cash balance plus the SKU-keyed catalogue.
///
/// Quantity-returning operations report what actually happened after
/// clamping, in the same spirit as a rows-affected count.
///
/// # Examples
///
/// ```
/// use stockyard::Inventory;
///
/// let mut store = Inventory::new();
/// store.add_item(10101, "hex bolts", 0.25)?;
/// store.restock(10101, 500, 0.10)?;
/// assert_eq!(store.sell(10101, 40)?, 40);
/// # Ok::<(), stockyard::Error>(())
/// ```
pub struct Inventory {
    balance: f64,
    records: RedBlackTree<u32, StockItem>,
}

impl Inventory {
    /// Open a store with [`OPENING_BALANCE`] in cash and no items.
    pub fn new() -> Self {
        Self {
            balance: OPENING_BALANCE,
            records: RedBlackTree::new(),
        }
    }

    /// Cash on hand.
    #[inline]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Number of catalogue entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalogue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Height of the catalogue tree.
    pub fn height(&self) -> usize {
        self.records.height()
    }

    /// Check the catalogue tree's structural invariants.
    pub fn is_valid(&self) -> bool {
        self.records.is_valid()
    }

    /// Breadth-first snapshot of the catalogue tree, root first.
    pub fn level_order(&self) -> Vec<LevelEntry<'_, u32, StockItem>> {
        self.records.level_order()
    }

    /// Add a new catalogue entry with an empty shelf.
    ///
    /// The stock always starts at zero; units arrive through
    /// [`restock`](Self::restock).
    pub fn add_item(&mut self, sku: u32, description: impl Into<String>, price: f64) -> Result<()> {
        let item = StockItem::new(description, price);
        if self.records.insert(sku, item) {
            Ok(())
        } else {
            Err(Error::DuplicateSku(sku))
        }
    }

    /// Drop a catalogue entry, shelf contents included.
    pub fn remove_item(&mut self, sku: u32) -> Result<()> {
        if self.records.remove(&sku) {
            Ok(())
        } else {
            Err(Error::SkuNotFound(sku))
        }
    }

    /// Borrow one catalogue entry.
    pub fn item(&self, sku: u32) -> Option<&StockItem> {
        self.records.get(&sku)
    }

    /// Iterate the catalogue in ascending SKU order.
    pub fn items(&self) -> impl Iterator<Item = (u32, &StockItem)> {
        self.records.iter().map(|(sku, item)| (*sku, item))
    }

    /// Rewrite an item's description in place.
    pub fn set_description(&mut self, sku: u32, description: impl Into<String>) -> Result<()> {
        let item = self.records.get_mut(&sku).ok_or(Error::SkuNotFound(sku))?;
        item.set_description(description);
        Ok(())
    }

    /// Change an item's unit sale price in place.
    pub fn set_price(&mut self, sku: u32, price: f64) -> Result<()> {
        let item = self.records.get_mut(&sku).ok_or(Error::SkuNotFound(sku))?;
        item.set_price(price);
        Ok(())
    }

    /// Buy stock for an item at the given unit cost.
    ///
    /// The purchase is clamped to the item's remaining shelf space. If
    /// the clamped cost exceeds the balance the whole restock is
    /// rejected and nothing changes. Returns the units actually bought.
    pub fn restock(&mut self, sku: u32, quantity: u32, unit_price: f64) -> Result<u32> {
        let balance = self.balance;
        let item = self.records.get_mut(&sku).ok_or(Error::SkuNotFound(sku))?;

        let bought = quantity.min(item.shelf_space());
        let cost = f64::from(bought) * unit_price;
        if cost > balance {
            return Err(Error::insufficient_funds(cost, balance));
        }

        item.set_stock(item.stock() + bought);
        self.balance -= cost;
        Ok(bought)
    }

    /// Sell units of an item at its catalogue price.
    ///
    /// The sale is clamped to what the shelf holds; selling from an
    /// empty shelf succeeds with zero units moved. Returns the units
    /// actually sold.
    pub fn sell(&mut self, sku: u32, quantity: u32) -> Result<u32> {
        let item = self.records.get_mut(&sku).ok_or(Error::SkuNotFound(sku))?;

        let sold = quantity.min(item.stock());
        let proceeds = f64::from(sold) * item.price();

        item.set_stock(item.stock() - sold);
        self.balance += proceeds;
        Ok(sold)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
