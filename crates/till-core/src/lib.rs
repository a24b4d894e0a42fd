//! # till-core: Pure Pricing Logic for Till
//!
//! This crate turns a product catalog, a set of promotions and a stream of
//! scanned codes into a total price. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli (binary)                            │   │
//! │  │    pricing.json ──► Catalog + promotions ──► scan ──► total    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │─►│  rules   │─►│ composer │─►│   checkout   │   │   │
//! │  │   │ Product  │  │ Regular  │  │ ordered  │  │ scan / total │   │   │
//! │  │   │ lookups  │  │ Bulk/BXGY│  │ list     │  │ summary      │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Product, CartLine, CartSnapshot
//! - [`catalog`] - Code → product lookups
//! - [`rules`] - The `PricingRule` trait and the built-in rules
//! - [`composer`] - Builds the ordered rule list a checkout evaluates
//! - [`checkout`] - Cart state, totals and summaries
//! - [`error`] - Domain error and diagnostic types
//! - [`validation`] - Input validation for externally sourced data
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use till_core::{
//!     compose, BulkDiscount, BuyXGetYFree, Catalog, Checkout, Money, Product, SharedRule,
//! };
//!
//! let catalog = Arc::new(Catalog::new([
//!     Product::new("ipd", "Super iPad", Money::from_cents(54999)),
//!     Product::new("atv", "Apple TV", Money::from_cents(10950)),
//!     Product::new("vga", "VGA adapter", Money::from_cents(3000)),
//! ]));
//!
//! let three_for_two = BuyXGetYFree::new(Arc::clone(&catalog), "atv", 3, 2)?;
//! let bulk_ipad = BulkDiscount::new(Arc::clone(&catalog), "ipd", 4, Money::from_cents(49999))?;
//! let promotions = [
//!     Arc::new(three_for_two) as SharedRule,
//!     Arc::new(bulk_ipad) as SharedRule,
//! ];
//!
//! let mut checkout = Checkout::new(compose(&catalog, promotions), Arc::clone(&catalog));
//! for code in ["atv", "atv", "atv", "vga"] {
//!     checkout.scan(code);
//! }
//! assert_eq!(checkout.total()?.to_string(), "$249.00");
//! # Ok::<(), till_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod composer;
pub mod error;
pub mod money;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use checkout::{Checkout, CheckoutSummary, RuleAdjustment};
pub use composer::{compose, compose_with, ComposeOptions, PricingRules};
pub use error::{CoreError, CoreResult, Diagnostic, ValidationError};
pub use money::Money;
pub use rules::{BulkDiscount, BuyXGetYFree, PricingRule, RegularPrice, RuleKind, SharedRule};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product code.
pub const MAX_CODE_LEN: usize = 50;

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum unit price accepted from outside the crate: $100,000,000.00.
///
/// Keeps `price × quantity` and cart sums far from `i64` overflow for any
/// realistic basket; rule arithmetic is still checked past this bound.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;
