//! # Pricing Rules
//!
//! A pricing rule is a unit of price computation scoped to one product code.
//!
//! ## Rule Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply(&CartSnapshot) -> Money                                          │
//! │                                                                         │
//! │    > 0   charge      (RegularPrice: quantity × unit price)              │
//! │    < 0   discount    (BulkDiscount, BuyXGetYFree)                       │
//! │    = 0   not applicable (code absent, below threshold, ...)             │
//! │                                                                         │
//! │  Every rule sees the SAME full snapshot; it picks out its own code.    │
//! │  Promotions never re-charge units: the RegularPrice rule for the       │
//! │  same code already did, promotions only subtract from it.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example: Buy 3 Apple TVs, pay for 2
//! ```text
//! Scanned: atv × 4 at $109.50
//!   RegularPrice(atv)       +$438.00   (4 × 109.50)
//!   BuyXGetYFree(atv, 3, 2) -$109.50   (1 complete set × 1 free unit)
//!                           ─────────
//!                            $328.50
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartSnapshot;

/// Shared handle to a rule inside a composed rule list.
pub type SharedRule = Arc<dyn PricingRule>;

// =============================================================================
// Rule Kind
// =============================================================================

/// Which family a rule belongs to.
///
/// Used for diagnostics and for promotion deduplication, which keys on
/// `(kind, code)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Regular,
    BulkDiscount,
    BuyXGetYFree,
    /// A caller-defined rule, identified by a static name.
    Custom(&'static str),
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Regular => f.write_str("regular"),
            RuleKind::BulkDiscount => f.write_str("bulk-discount"),
            RuleKind::BuyXGetYFree => f.write_str("buy-x-get-y-free"),
            RuleKind::Custom(name) => f.write_str(name),
        }
    }
}

impl Serialize for RuleKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Pricing Rule Trait
// =============================================================================

/// Interface for all pricing rules.
///
/// Implementations must be pure: the same snapshot always yields the same
/// adjustment, and the snapshot is never modified.
pub trait PricingRule: fmt::Debug + Send + Sync {
    /// The product code this rule targets.
    fn code(&self) -> &str;

    fn kind(&self) -> RuleKind;

    /// Signed adjustment this rule contributes for `snapshot`.
    fn apply(&self, snapshot: &CartSnapshot) -> CoreResult<Money>;

    /// The catalog this rule prices against, if it holds one.
    ///
    /// The composer drops rules bound to a different catalog than the one
    /// it composes for. Rules that carry no catalog are never checked.
    fn catalog(&self) -> Option<&Arc<Catalog>> {
        None
    }
}

// =============================================================================
// Regular Price
// =============================================================================

/// Applies the standard catalog unit price to every scanned unit.
#[derive(Debug, Clone)]
pub struct RegularPrice {
    code: String,
    catalog: Arc<Catalog>,
}

impl RegularPrice {
    pub fn new(catalog: Arc<Catalog>, code: impl Into<String>) -> Self {
        RegularPrice {
            code: code.into(),
            catalog,
        }
    }
}

impl PricingRule for RegularPrice {
    fn code(&self) -> &str {
        &self.code
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Regular
    }

    fn catalog(&self) -> Option<&Arc<Catalog>> {
        Some(&self.catalog)
    }

    fn apply(&self, snapshot: &CartSnapshot) -> CoreResult<Money> {
        let quantity = snapshot.quantity_of(&self.code);
        if quantity == 0 {
            return Ok(Money::zero());
        }

        let unit_price = self.catalog.lookup_price(&self.code)?;
        unit_price
            .checked_times(quantity)
            .ok_or_else(|| out_of_range(&self.code))
    }
}

// =============================================================================
// Bulk Discount
// =============================================================================

/// Drops the unit price of EVERY unit once a minimum quantity is bought.
///
/// E.g. buy 4 or more Super iPads and each one costs $499.99:
/// - threshold: 4 (reaching it exactly qualifies)
/// - discounted_price: 499.99
///
/// ## Adjustment
/// ```text
/// quantity <  threshold  →  0
/// quantity >= threshold  →  −quantity × (unit_price − discounted_price)
/// ```
#[derive(Debug, Clone)]
pub struct BulkDiscount {
    code: String,
    threshold: u32,
    discounted_price: Money,
    catalog: Arc<Catalog>,
}

impl BulkDiscount {
    /// ## Errors
    /// `CoreError::InvalidConfiguration` when `threshold` is zero or
    /// `discounted_price` is negative.
    pub fn new(
        catalog: Arc<Catalog>,
        code: impl Into<String>,
        threshold: u32,
        discounted_price: Money,
    ) -> CoreResult<Self> {
        let code = code.into();
        let invalid = |reason: &str| CoreError::InvalidConfiguration {
            code: code.clone(),
            kind: RuleKind::BulkDiscount,
            reason: reason.to_string(),
        };

        if threshold == 0 {
            return Err(invalid("threshold must be at least 1"));
        }
        if discounted_price.is_negative() {
            return Err(invalid("discounted price cannot be negative"));
        }

        Ok(BulkDiscount {
            code,
            threshold,
            discounted_price,
            catalog,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn discounted_price(&self) -> Money {
        self.discounted_price
    }
}

impl PricingRule for BulkDiscount {
    fn code(&self) -> &str {
        &self.code
    }

    fn kind(&self) -> RuleKind {
        RuleKind::BulkDiscount
    }

    fn catalog(&self) -> Option<&Arc<Catalog>> {
        Some(&self.catalog)
    }

    fn apply(&self, snapshot: &CartSnapshot) -> CoreResult<Money> {
        let quantity = snapshot.quantity_of(&self.code);
        if quantity < self.threshold {
            return Ok(Money::zero());
        }

        let unit_price = self.catalog.lookup_price(&self.code)?;
        unit_price
            .checked_sub(self.discounted_price)
            .and_then(|per_unit| per_unit.checked_times(quantity))
            .and_then(|discount| discount.checked_neg())
            .ok_or_else(|| out_of_range(&self.code))
    }
}

// =============================================================================
// Buy X Get Y Free
// =============================================================================

/// "Buy `set_quantity`, pay for `pay_quantity`" promotion.
///
/// E.g. 3 for 2 on Apple TVs:
/// - set_quantity: 3
/// - pay_quantity: 2
///
/// Units left over after the last complete set stay at full price; only
/// complete sets earn free units. The adjustment is never positive.
#[derive(Debug, Clone)]
pub struct BuyXGetYFree {
    code: String,
    set_quantity: u32,
    pay_quantity: u32,
    catalog: Arc<Catalog>,
}

impl BuyXGetYFree {
    /// ## Errors
    /// `CoreError::InvalidConfiguration` unless `set_quantity > pay_quantity`.
    pub fn new(
        catalog: Arc<Catalog>,
        code: impl Into<String>,
        set_quantity: u32,
        pay_quantity: u32,
    ) -> CoreResult<Self> {
        let code = code.into();
        if set_quantity <= pay_quantity {
            return Err(CoreError::InvalidConfiguration {
                code,
                kind: RuleKind::BuyXGetYFree,
                reason: "set_quantity must be greater than pay_quantity".to_string(),
            });
        }

        Ok(BuyXGetYFree {
            code,
            set_quantity,
            pay_quantity,
            catalog,
        })
    }

    pub fn set_quantity(&self) -> u32 {
        self.set_quantity
    }

    pub fn pay_quantity(&self) -> u32 {
        self.pay_quantity
    }

    fn free_units_per_set(&self) -> u32 {
        self.set_quantity - self.pay_quantity
    }
}

impl PricingRule for BuyXGetYFree {
    fn code(&self) -> &str {
        &self.code
    }

    fn kind(&self) -> RuleKind {
        RuleKind::BuyXGetYFree
    }

    fn catalog(&self) -> Option<&Arc<Catalog>> {
        Some(&self.catalog)
    }

    fn apply(&self, snapshot: &CartSnapshot) -> CoreResult<Money> {
        let complete_sets = snapshot.quantity_of(&self.code) / self.set_quantity;
        if complete_sets == 0 {
            return Ok(Money::zero());
        }

        // complete_sets * free_units_per_set never exceeds the quantity
        let free_units = complete_sets * self.free_units_per_set();
        let unit_price = self.catalog.lookup_price(&self.code)?;
        unit_price
            .checked_times(free_units)
            .and_then(|discount| discount.checked_neg())
            .ok_or_else(|| out_of_range(&self.code))
    }
}

fn out_of_range(code: &str) -> CoreError {
    CoreError::AmountOverflow {
        code: code.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
