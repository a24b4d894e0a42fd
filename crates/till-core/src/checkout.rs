//! # Checkout
//!
//! Accumulates scanned item quantities and evaluates the composed rule list
//! against them.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Operations                                  │
//! │                                                                         │
//! │  Caller Action     Method          Cart Change                          │
//! │  ─────────────     ──────          ───────────                          │
//! │                                                                         │
//! │  Scan barcode ───► scan(code) ───► known?   line.quantity += 1         │
//! │                                    unknown? no change, Diagnostic      │
//! │                                                                         │
//! │  Ask for total ──► total() ──────► (read only) snapshot → Σ rules      │
//! │                                                                         │
//! │  Next customer ──► clear() ──────► lines emptied, new session id       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! A `Checkout` belongs to one transaction. The catalog and rules behind it
//! are shared `Arc`s, so any number of checkouts can run side by side;
//! sharing ONE checkout across threads needs an external `Mutex`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::composer::PricingRules;
use crate::error::{CoreError, CoreResult, Diagnostic};
use crate::money::Money;
use crate::rules::RuleKind;
use crate::types::{CartLine, CartSnapshot};

/// Checkout system implementing scan and total calculation.
#[derive(Debug)]
pub struct Checkout {
    catalog: Arc<Catalog>,
    rules: PricingRules,
    lines: Vec<CartLine>,
    diagnostics: Vec<Diagnostic>,
    session_id: Uuid,
    started_at: DateTime<Utc>,
}

impl Checkout {
    /// Creates an empty checkout evaluating `rules`.
    ///
    /// `rules` should come from `compose` over this same `catalog`: scans are
    /// checked against `catalog` while each rule prices against the catalog
    /// it was built with. A mismatch is logged, not rejected.
    pub fn new(rules: PricingRules, catalog: Arc<Catalog>) -> Self {
        if !rules.is_composed_for(&catalog) {
            warn!("Pricing rules were composed for a different catalog than the checkout's");
        }

        Checkout {
            catalog,
            rules,
            lines: Vec::new(),
            diagnostics: Vec::new(),
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Scans one unit of `code` into the cart.
    ///
    /// Codes missing from the catalog are ignored: the cart is unchanged and
    /// a `Diagnostic::UnknownScan` is recorded.
    pub fn scan(&mut self, code: &str) {
        if !self.catalog.has(code) {
            warn!(
                %code,
                session = %self.session_id,
                "Attempted to scan unknown item, scan ignored"
            );
            self.diagnostics.push(Diagnostic::UnknownScan {
                code: code.to_string(),
            });
            return;
        }

        match self.lines.iter_mut().find(|line| line.code == code) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(code, 1)),
        }
        debug!(%code, quantity = self.quantity_of(code), "Scanned item");
    }

    /// Immutable copy of the current cart contents.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from_lines(self.lines.iter().cloned())
    }

    /// Total price after applying every rule to the same snapshot.
    ///
    /// ## Errors
    /// Propagates the first rule failure, e.g. `CoreError::ProductNotFound`
    /// from a hand-built rule whose code the catalog lacks, and
    /// `CoreError::AmountOverflow` when the sum leaves the `i64` range.
    pub fn total(&self) -> CoreResult<Money> {
        let snapshot = self.snapshot();
        self.rules.iter().try_fold(Money::zero(), |total, rule| {
            add_adjustment(total, rule.apply(&snapshot)?, rule.code())
        })
    }

    /// Itemised view of the current cart: the non-zero contribution of each
    /// rule plus the total they add up to.
    pub fn summary(&self) -> CoreResult<CheckoutSummary> {
        let snapshot = self.snapshot();

        let mut adjustments = Vec::new();
        let mut total = Money::zero();
        for rule in &self.rules {
            let amount = rule.apply(&snapshot)?;
            total = add_adjustment(total, amount, rule.code())?;
            if !amount.is_zero() {
                adjustments.push(RuleAdjustment {
                    code: rule.code().to_string(),
                    kind: rule.kind(),
                    amount,
                });
            }
        }

        Ok(CheckoutSummary {
            session_id: self.session_id,
            started_at: self.started_at,
            item_count: snapshot.item_count(),
            total_quantity: snapshot.total_quantity(),
            lines: snapshot.lines().to_vec(),
            adjustments,
            total,
            diagnostics: self.diagnostics.clone(),
        })
    }

    /// Empties the cart and starts a fresh session.
    pub fn clear(&mut self) {
        info!(session = %self.session_id, items = self.lines.len(), "Clearing checkout");
        self.lines.clear();
        self.diagnostics.clear();
        self.session_id = Uuid::new_v4();
        self.started_at = Utc::now();
    }

    pub fn quantity_of(&self, code: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.code == code)
            .map_or(0, |line| line.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Non-fatal issues raised since the session started.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drains the collected diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// One rule's non-zero contribution to a total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleAdjustment {
    pub code: String,
    pub kind: RuleKind,
    #[serde(rename = "amount_cents")]
    pub amount: Money,
}

/// Checkout summary for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub lines: Vec<CartLine>,
    pub adjustments: Vec<RuleAdjustment>,
    #[serde(rename = "total_cents")]
    pub total: Money,
    pub diagnostics: Vec<Diagnostic>,
}

fn add_adjustment(total: Money, amount: Money, code: &str) -> CoreResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| CoreError::AmountOverflow {
            code: code.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::compose;
    use crate::rules::{PricingRule, SharedRule};
    use crate::types::Product;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new([
            Product::new("ipd", "Super iPad", Money::from_cents(54999)),
            Product::new("mbp", "MacBook Pro", Money::from_cents(139999)),
            Product::new("atv", "Apple TV", Money::from_cents(10950)),
            Product::new("vga", "VGA adapter", Money::from_cents(3000)),
        ]))
    }

    fn regular_checkout() -> Checkout {
        let catalog = catalog();
        Checkout::new(compose(&catalog, Vec::<SharedRule>::new()), catalog)
    }

    /// Returns a fixed amount and records the snapshot it saw.
    #[derive(Debug)]
    struct FixedRule {
        amount: Money,
        seen: std::sync::Mutex<Vec<CartSnapshot>>,
    }

    impl PricingRule for FixedRule {
        fn code(&self) -> &str {
            "ipd"
        }

        fn kind(&self) -> RuleKind {
            RuleKind::Custom("fixed")
        }

        fn apply(&self, snapshot: &CartSnapshot) -> CoreResult<Money> {
            self.seen.lock().unwrap().push(snapshot.clone());
            Ok(self.amount)
        }
    }

    #[test]
    fn test_scan_adds_items() {
        let mut checkout = regular_checkout();
        checkout.scan("ipd");
        assert_eq!(checkout.total().unwrap().cents(), 54999);
    }

    #[test]
    fn test_repeated_scans_accumulate() {
        let mut checkout = regular_checkout();
        checkout.scan("atv");
        checkout.scan("atv");
        assert_eq!(checkout.quantity_of("atv"), 2);
        assert_eq!(checkout.total().unwrap().cents(), 2 * 10950);

        checkout.scan("atv");
        assert_eq!(checkout.total().unwrap().cents(), 32850);
    }

    #[test]
    fn test_multiple_different_items() {
        let mut checkout = regular_checkout();
        checkout.scan("ipd");
        checkout.scan("mbp");
        checkout.scan("vga");
        assert_eq!(checkout.total().unwrap().cents(), 197998);
    }

    #[test]
    fn test_unknown_scan_is_ignored_and_reported() {
        let mut checkout = regular_checkout();
        checkout.scan("unknown_sku");
        checkout.scan("ipd");

        assert_eq!(checkout.total().unwrap().cents(), 54999);
        assert_eq!(checkout.quantity_of("unknown_sku"), 0);
        assert_eq!(
            checkout.diagnostics(),
            [Diagnostic::UnknownScan {
                code: "unknown_sku".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let checkout = regular_checkout();
        assert!(checkout.is_empty());
        assert_eq!(checkout.total().unwrap(), Money::zero());
    }

    #[test]
    fn test_every_rule_sees_the_full_snapshot() {
        let catalog = catalog();
        let fixed = |cents| {
            Arc::new(FixedRule {
                amount: Money::from_cents(cents),
                seen: Default::default(),
            })
        };
        let (a, b, c) = (fixed(10000), fixed(20000), fixed(5050));
        let promotions = [
            a.clone() as SharedRule,
            b.clone() as SharedRule,
            c.clone() as SharedRule,
        ];

        let mut checkout = Checkout::new(compose(&catalog, promotions), catalog);
        checkout.scan("ipd");
        checkout.scan("vga");

        // 549.99 + 30.00 regular, then 100 + 200 + 50.50 from the fixed rules
        assert_eq!(checkout.total().unwrap().cents(), 54999 + 3000 + 35050);

        let expected = CartSnapshot::from_lines([CartLine::new("ipd", 1), CartLine::new("vga", 1)]);
        for rule in [&a, &b, &c] {
            assert_eq!(*rule.seen.lock().unwrap(), [expected.clone()]);
        }
    }

    #[test]
    fn test_clear_resets_cart_and_session() {
        let mut checkout = regular_checkout();
        let first_session = checkout.session_id();
        checkout.scan("ipd");
        checkout.scan("nope");

        checkout.clear();
        assert_eq!(checkout.total().unwrap(), Money::zero());
        assert!(checkout.diagnostics().is_empty());
        assert_ne!(checkout.session_id(), first_session);

        checkout.scan("vga");
        assert_eq!(checkout.total().unwrap().cents(), 3000);
    }

    #[test]
    fn test_summary_lists_non_zero_adjustments() {
        let mut checkout = regular_checkout();
        checkout.scan("atv");
        checkout.scan("atv");
        checkout.scan("vga");

        let summary = checkout.summary().unwrap();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert_eq!(summary.adjustments.len(), 2);
        assert_eq!(summary.adjustments[0].code, "atv");
        assert_eq!(summary.adjustments[0].amount.cents(), 21900);
        assert_eq!(summary.total, checkout.total().unwrap());
    }

    #[test]
    fn test_rule_failure_propagates() {
        #[derive(Debug)]
        struct Broken;

        impl PricingRule for Broken {
            fn code(&self) -> &str {
                "ipd"
            }

            fn kind(&self) -> RuleKind {
                RuleKind::Custom("broken")
            }

            fn apply(&self, _snapshot: &CartSnapshot) -> CoreResult<Money> {
                Err(CoreError::ProductNotFound("ghost".to_string()))
            }
        }

        let catalog = catalog();
        let rules = compose(&catalog, [Arc::new(Broken) as SharedRule]);
        let checkout = Checkout::new(rules, catalog);

        assert!(matches!(checkout.total(), Err(CoreError::ProductNotFound(_))));
        assert!(checkout.summary().is_err());
    }

    #[test]
    fn test_total_out_of_range_is_an_error() {
        let price: Money = "50000000000000000".parse().unwrap();
        let catalog = Arc::new(Catalog::new([
            Product::new("big", "Very expensive", price),
            Product::new("big2", "Also very expensive", price),
        ]));
        let mut checkout = Checkout::new(compose(&catalog, Vec::<SharedRule>::new()), catalog);

        checkout.scan("big");
        assert_eq!(checkout.total().unwrap(), price);

        // Two units overflow inside the regular rule
        checkout.scan("big");
        assert!(matches!(
            checkout.total(),
            Err(CoreError::AmountOverflow { ref code }) if code == "big"
        ));

        // One unit each overflows only when the rules are summed
        checkout.clear();
        checkout.scan("big");
        checkout.scan("big2");
        assert!(matches!(
            checkout.total(),
            Err(CoreError::AmountOverflow { ref code }) if code == "big2"
        ));
        assert!(checkout.summary().is_err());
    }

    #[test]
    fn test_take_diagnostics_drains() {
        let mut checkout = regular_checkout();
        checkout.scan("x");
        assert_eq!(checkout.take_diagnostics().len(), 1);
        assert!(checkout.diagnostics().is_empty());
    }
}
