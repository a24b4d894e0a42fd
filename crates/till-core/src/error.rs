//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Fatal (returned as Err)                                               │
//! │  ├── CoreError        - Lookup and rule configuration failures         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Non-fatal (collected, operation becomes a no-op)                      │
//! │  └── Diagnostic       - Unknown scans, skipped or duplicate rules      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError (till-cli) → stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, rule kind, etc.)
//! 3. Errors are enum variants, never String

use serde::Serialize;
use thiserror::Error;

use crate::rules::RuleKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
///
/// These surface immediately to the caller of the operation that raised
/// them; nothing in the crate recovers from them internally.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product code cannot be found in the catalog.
    ///
    /// ## When This Occurs
    /// - `Catalog::lookup_price` for a code that was never catalogued
    /// - A rule built by hand for a foreign code is evaluated against a
    ///   cart that contains that code
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A pricing rule was constructed with parameters that can never work.
    ///
    /// ## When This Occurs
    /// - Buy-X-Get-Y-Free with `set_quantity <= pay_quantity`
    /// - Bulk discount with a zero threshold
    #[error("Invalid {kind} configuration for {code}: {reason}")]
    InvalidConfiguration {
        code: String,
        kind: RuleKind,
        reason: String,
    },

    /// An amount left the range `Money` can represent.
    ///
    /// ## When This Occurs
    /// - A hand-built catalog carries prices beyond `MAX_PRICE_CENTS` and a
    ///   rule multiplies them by a large quantity
    /// - The sum of rule adjustments does not fit in an `i64` of cents
    #[error("Amount out of range while pricing {code}")]
    AmountOverflow { code: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of products and rule parameters coming from
/// outside the crate (pricing files, command-line arguments).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a malformed price string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same code listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A non-fatal issue absorbed by the catalog-facing operations.
///
/// ## Side Channel
/// ```text
/// scan("xyz") ──► code unknown? ──► cart unchanged
///                                     │
///                                     ├──► tracing::warn!
///                                     └──► Diagnostic::UnknownScan pushed
/// ```
/// Callers read the collected list through `Checkout::diagnostics` or
/// `PricingRules::diagnostics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A scanned code is not in the catalog; the scan was ignored.
    #[error("Attempted to scan unknown item: {code} - scan ignored")]
    UnknownScan { code: String },

    /// A promotional rule targets a code that is not in the catalog; the
    /// rule was dropped from the composed list.
    #[error("Pricing rule {kind} assigned to unknown code: {code} - rule ignored")]
    UnknownRuleCode { code: String, kind: RuleKind },

    /// A promotional rule was built against a different `Catalog` than the
    /// one the rule list is composed for; the rule was dropped.
    #[error("Pricing rule {kind} for {code} is bound to a different catalog - rule ignored")]
    ForeignCatalog { code: String, kind: RuleKind },

    /// A second promotional rule of the same kind for the same code was
    /// dropped because deduplication is enabled.
    #[error("Duplicate {kind} rule for {code} - rule ignored")]
    DuplicateRule { code: String, kind: RuleKind },
}

impl Diagnostic {
    /// The product code the diagnostic is about.
    pub fn code(&self) -> &str {
        match self {
            Diagnostic::UnknownScan { code }
            | Diagnostic::UnknownRuleCode { code, .. }
            | Diagnostic::ForeignCatalog { code, .. }
            | Diagnostic::DuplicateRule { code, .. } => code,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("ipd".to_string());
        assert_eq!(err.to_string(), "Product not found: ipd");

        let err = CoreError::InvalidConfiguration {
            code: "atv".to_string(),
            kind: RuleKind::BuyXGetYFree,
            reason: "set_quantity must be greater than pay_quantity".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid buy-x-get-y-free configuration for atv: \
             set_quantity must be greater than pay_quantity"
        );

        let err = CoreError::AmountOverflow {
            code: "ipd".to_string(),
        };
        assert_eq!(err.to_string(), "Amount out of range while pricing ipd");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_diagnostic_messages() {
        let diag = Diagnostic::UnknownScan {
            code: "unknown_sku".to_string(),
        };
        assert_eq!(
            diag.to_string(),
            "Attempted to scan unknown item: unknown_sku - scan ignored"
        );
        assert_eq!(diag.code(), "unknown_sku");

        let diag = Diagnostic::UnknownRuleCode {
            code: "unknown_sku".to_string(),
            kind: RuleKind::BulkDiscount,
        };
        assert_eq!(
            diag.to_string(),
            "Pricing rule bulk-discount assigned to unknown code: unknown_sku - rule ignored"
        );
    }
}
