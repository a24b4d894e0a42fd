//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │  CartSnapshot   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code           │   │  code           │   │  lines (frozen) │       │
//! │  │  name           │   │  quantity       │   │  quantity_of()  │       │
//! │  │  price (Money)  │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   static catalog        mutable, owned by     immutable, handed to     │
//! │   data                  the Checkout          every pricing rule       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Source of truth for product details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, case-sensitive product code ("ipd", "atv", ...).
    pub code: String,

    /// Display name shown on summaries.
    pub name: String,

    /// Unit price in cents.
    #[serde(rename = "price_cents")]
    pub price: Money,
}

impl Product {
    /// Creates a product.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// Accumulated quantity of one product code in the current transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub code: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(code: impl Into<String>, quantity: u32) -> Self {
        CartLine {
            code: code.into(),
            quantity,
        }
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Frozen view of the cart handed to pricing rules during `total()`.
///
/// ## Invariants
/// - At most one line per code (the Checkout guarantees it; `from_lines`
///   merges duplicates so hand-built snapshots keep it too)
/// - Lines keep first-scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// Builds a snapshot, merging lines that share a code.
    ///
    /// Merged quantities saturate at `u32::MAX`, the same as repeated scans.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::new();
        for line in lines {
            match merged.iter_mut().find(|l| l.code == line.code) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => merged.push(line),
            }
        }
        CartSnapshot { lines: merged }
    }

    /// Quantity of `code` in the cart; 0 when absent.
    pub fn quantity_of(&self, code: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.code == code)
            .map_or(0, |line| line.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct codes with a non-zero quantity.
    pub fn item_count(&self) -> usize {
        self.lines.iter().filter(|l| l.quantity > 0).count()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_price_in_cents() {
        let product = Product::new("atv", "Apple TV", Money::from_cents(10950));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["code"], "atv");
        assert_eq!(json["price_cents"], 10950);

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_snapshot_quantity_of() {
        let snapshot =
            CartSnapshot::from_lines([CartLine::new("ipd", 2), CartLine::new("atv", 3)]);
        assert_eq!(snapshot.quantity_of("ipd"), 2);
        assert_eq!(snapshot.quantity_of("atv"), 3);
        assert_eq!(snapshot.quantity_of("vga"), 0);
        // Codes are case-sensitive
        assert_eq!(snapshot.quantity_of("IPD"), 0);
    }

    #[test]
    fn test_snapshot_merges_duplicate_codes() {
        let snapshot = CartSnapshot::from_lines([
            CartLine::new("atv", 1),
            CartLine::new("vga", 1),
            CartLine::new("atv", 2),
        ]);
        assert_eq!(snapshot.lines().len(), 2);
        assert_eq!(snapshot.quantity_of("atv"), 3);
        assert_eq!(snapshot.lines()[0].code, "atv");
    }

    #[test]
    fn test_merged_quantity_saturates() {
        let snapshot =
            CartSnapshot::from_lines([CartLine::new("atv", u32::MAX), CartLine::new("atv", 1)]);
        assert_eq!(snapshot.quantity_of("atv"), u32::MAX);
        assert_eq!(snapshot.total_quantity(), u64::from(u32::MAX));
    }

    #[test]
    fn test_zero_quantity_lines_count_as_absent() {
        let snapshot = CartSnapshot::from_lines([CartLine::new("ipd", 0)]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.item_count(), 0);
        assert_eq!(snapshot.total_quantity(), 0);
    }
}
