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

//! Error types for Stockyard
//!
//! This module defines the error cases of the catalogue and ledger layer.
//! Tree lookups report absence through `bool`/`Option` returns, not
//! through errors; everything here is a store-level outcome the caller
//! must handle.

use thiserror::Error;

/// Result type alias for Stockyard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for catalogue and ledger operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // =========================================================================
    // Catalogue errors
    // =========================================================================
    /// SKU already present when adding a new item
    #[error("sku {0:05} already in the catalogue")]
    DuplicateSku(u32),

    /// SKU not present for an edit, restock, sell, or remove
    #[error("sku {0:05} not found")]
    SkuNotFound(u32),

    // =========================================================================
    // Ledger errors
    // =========================================================================
    /// Purchase cost exceeds the available balance; the whole restock is
    /// rejected, no partial purchase happens
    #[error("insufficient funds: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },
}

impl Error {
    /// Create a new InsufficientFunds error
    pub fn insufficient_funds(required: f64, available: f64) -> Self {
        Error::InsufficientFunds {
            required,
            available,
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SkuNotFound(_))
    }

    /// Check if this error rejected an operation over money
    pub fn is_ledger_error(&self) -> bool {
        matches!(self, Error::InsufficientFunds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::DuplicateSku(42).to_string(),
            "sku 00042 already in the catalogue"
        );
        assert_eq!(Error::SkuNotFound(10101).to_string(), "sku 10101 not found");
        assert_eq!(
            Error::insufficient_funds(1500.0, 200.5).to_string(),
            "insufficient funds: need 1500.00, have 200.50"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::SkuNotFound(7).is_not_found());
        assert!(!Error::DuplicateSku(7).is_not_found());
        assert!(!Error::insufficient_funds(1.0, 0.0).is_not_found());

        assert!(Error::insufficient_funds(1.0, 0.0).is_ledger_error());
        assert!(!Error::SkuNotFound(7).is_ledger_error());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::DuplicateSku(3), Error::DuplicateSku(3));
        assert_ne!(Error::DuplicateSku(3), Error::SkuNotFound(3));
        assert_eq!(
            Error::insufficient_funds(10.0, 5.0),
            Error::insufficient_funds(10.0, 5.0)
        );
        assert_ne!(
            Error::insufficient_funds(10.0, 5.0),
            Error::insufficient_funds(10.0, 4.0)
        );
    }
}
