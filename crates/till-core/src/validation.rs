//! # Validation Module
//!
//! Input validation for products and rule parameters that come from outside
//! the crate.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Pricing file / CLI arguments (till-cli)                      │
//! │  ├── JSON shape (serde deserialization)                                │
//! │  └── Decimal price text (Money::from_str)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Code / name format                                                │
//! │  ├── Non-negative prices                                               │
//! │  └── Unique codes across a product list                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Rule constructors                                            │
//! │  └── InvalidConfiguration (set <= pay, zero threshold)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Catalog::new` itself accepts anything; callers that load products from
//! untrusted sources run them through `validate_products` first.
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_code, validate_quantity};
//!
//! assert!(validate_code("atv").is_ok());
//! assert!(validate_quantity("threshold", 0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_CODE_LEN, MAX_NAME_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most `MAX_CODE_LEN` characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// Codes are case-sensitive and are NOT trimmed: `" atv"` is rejected
/// rather than silently becoming `"atv"`.
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_NAME_LEN` characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price. Zero is allowed (free items); negative or above
/// `MAX_PRICE_CENTS` is not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a rule quantity parameter (threshold, set size) is at least 1.
pub fn validate_quantity(field: &str, qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_code(&product.code)?;
    validate_product_name(&product.name)?;
    validate_price(product.price)
}

/// Validates every product and rejects repeated codes.
///
/// `Catalog::new` would let the last duplicate win; a pricing file listing
/// the same code twice is almost always a typo, so loaders reject it here.
pub fn validate_products(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for product in products {
        validate_product(product)?;
        if !seen.insert(product.code.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "code".to_string(),
                value: product.code.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
