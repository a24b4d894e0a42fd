//! # Rule Composer
//!
//! Merges caller-supplied promotional rules with catalog-derived regular
//! rules into the ordered list a `Checkout` evaluates.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Phase 1: one RegularPrice per catalog product (catalog order)         │
//! │           ipd, mbp, atv, vga                                           │
//! │                                                                         │
//! │  Phase 2: promotions, input order                                      │
//! │           code in catalog?   ── no ──► skipped + Diagnostic            │
//! │                 │ yes                                                   │
//! │           dedupe on and (kind, code) seen? ── yes ──► skipped + Diag.  │
//! │                 │ no                                                    │
//! │                 ▼                                                       │
//! │           appended                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Every product therefore always has its base-price contribution, and
//! promotions only ever add adjustments on top.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::Diagnostic;
use crate::rules::{RegularPrice, SharedRule};

/// Knobs for `compose_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Keep only the first promotion per `(kind, code)`. Off by default, in
    /// which case duplicate promotions are all applied and their
    /// adjustments summed.
    pub dedupe_promotions: bool,
}

/// The composed, ordered rule list plus what was dropped while building it.
#[derive(Debug, Clone, Default)]
pub struct PricingRules {
    rules: Vec<SharedRule>,
    regular_count: usize,
    diagnostics: Vec<Diagnostic>,
    catalog: Option<Arc<Catalog>>,
}

impl PricingRules {
    pub fn iter(&self) -> impl Iterator<Item = &SharedRule> + '_ {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The leading regular-price rules.
    pub fn regular(&self) -> &[SharedRule] {
        &self.rules[..self.regular_count]
    }

    /// The accepted promotions, in input order.
    pub fn promotions(&self) -> &[SharedRule] {
        &self.rules[self.regular_count..]
    }

    /// Non-fatal issues raised while composing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether this list was composed for exactly `catalog` (same `Arc`).
    pub fn is_composed_for(&self, catalog: &Arc<Catalog>) -> bool {
        self.catalog
            .as_ref()
            .is_some_and(|own| Arc::ptr_eq(own, catalog))
    }
}

impl<'a> IntoIterator for &'a PricingRules {
    type Item = &'a SharedRule;
    type IntoIter = std::slice::Iter<'a, SharedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Composes the final rule list with default options (no deduplication).
pub fn compose(
    catalog: &Arc<Catalog>,
    promotions: impl IntoIterator<Item = SharedRule>,
) -> PricingRules {
    compose_with(catalog, promotions, ComposeOptions::default())
}

/// Composes the final rule list.
///
/// Promotions for codes absent from the catalog, or built against another
/// `Catalog` instance, are skipped and reported through
/// `PricingRules::diagnostics`; composing itself never fails.
pub fn compose_with(
    catalog: &Arc<Catalog>,
    promotions: impl IntoIterator<Item = SharedRule>,
    options: ComposeOptions,
) -> PricingRules {
    let mut rules: Vec<SharedRule> = catalog
        .all_products()
        .map(|product| {
            Arc::new(RegularPrice::new(Arc::clone(catalog), &product.code)) as SharedRule
        })
        .collect();
    let regular_count = rules.len();

    let mut diagnostics = Vec::new();
    let mut seen = HashSet::new();

    for promotion in promotions {
        let code = promotion.code().to_string();
        let kind = promotion.kind();

        if !catalog.has(&code) {
            warn!(%code, %kind, "Pricing rule assigned to unknown code, rule ignored");
            diagnostics.push(Diagnostic::UnknownRuleCode { code, kind });
            continue;
        }

        if promotion
            .catalog()
            .is_some_and(|bound| !Arc::ptr_eq(bound, catalog))
        {
            warn!(%code, %kind, "Pricing rule bound to a different catalog, rule ignored");
            diagnostics.push(Diagnostic::ForeignCatalog { code, kind });
            continue;
        }

        if options.dedupe_promotions && !seen.insert((kind, code.clone())) {
            warn!(%code, %kind, "Duplicate promotion, rule ignored");
            diagnostics.push(Diagnostic::DuplicateRule { code, kind });
            continue;
        }

        rules.push(promotion);
    }

    debug!(
        regular = regular_count,
        promotions = rules.len() - regular_count,
        skipped = diagnostics.len(),
        "Composed pricing rules"
    );

    PricingRules {
        rules,
        regular_count,
        diagnostics,
        catalog: Some(Arc::clone(catalog)),
    }
}
