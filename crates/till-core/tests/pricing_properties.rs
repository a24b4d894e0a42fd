//! Property tests for pricing invariants.

use std::sync::Arc;

use proptest::prelude::*;
use till_core::{
    compose, BulkDiscount, BuyXGetYFree, CartLine, CartSnapshot, Catalog, Checkout, Money,
    PricingRule, Product, SharedRule,
};

const CODES: [&str; 4] = ["ipd", "mbp", "atv", "vga"];

fn arb_catalog() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..500_000, CODES.len())
}

fn build_catalog(prices: &[i64]) -> Arc<Catalog> {
    Arc::new(Catalog::new(
        CODES
            .iter()
            .zip(prices)
            .map(|(code, cents)| {
                Product::new(*code, code.to_uppercase(), Money::from_cents(*cents))
            }),
    ))
}

fn arb_scans() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..CODES.len(), 0..40)
}

proptest! {
    #[test]
    fn prop_regular_total_is_quantity_times_price(prices in arb_catalog(), scans in arb_scans()) {
        let catalog = build_catalog(&prices);
        let rules = compose(&catalog, Vec::<SharedRule>::new());
        let mut checkout = Checkout::new(rules, Arc::clone(&catalog));
        for &i in &scans {
            checkout.scan(CODES[i]);
        }

        let expected: i64 = scans.iter().map(|&i| prices[i]).sum();
        prop_assert_eq!(checkout.total().unwrap().cents(), expected);
    }

    #[test]
    fn prop_scan_order_does_not_matter(prices in arb_catalog(), scans in arb_scans()) {
        let catalog = build_catalog(&prices);
        let promotions = || {
            [
                Arc::new(BuyXGetYFree::new(Arc::clone(&catalog), "atv", 3, 2).unwrap())
                    as SharedRule,
                Arc::new(
                    BulkDiscount::new(Arc::clone(&catalog), "ipd", 4, Money::from_cents(100))
                        .unwrap(),
                ) as SharedRule,
            ]
        };

        let mut forward = Checkout::new(compose(&catalog, promotions()), Arc::clone(&catalog));
        let mut backward = Checkout::new(compose(&catalog, promotions()), Arc::clone(&catalog));
        for &i in &scans {
            forward.scan(CODES[i]);
        }
        for &i in scans.iter().rev() {
            backward.scan(CODES[i]);
        }

        prop_assert_eq!(forward.total().unwrap(), backward.total().unwrap());
    }

    #[test]
    fn prop_buy_x_get_y_never_charges(
        price in 0i64..500_000,
        quantity in 0u32..1_000,
        (set, pay) in (1u32..10).prop_flat_map(|set| (Just(set), 0..set)),
    ) {
        let catalog = build_catalog(&[price, price, price, price]);
        let rule = BuyXGetYFree::new(Arc::clone(&catalog), "atv", set, pay).unwrap();
        let snapshot = CartSnapshot::from_lines([CartLine::new("atv", quantity)]);

        let adjustment = rule.apply(&snapshot).unwrap();
        prop_assert!(!adjustment.is_positive());
        prop_assert_eq!(
            adjustment.cents(),
            -(i64::from(quantity / set) * i64::from(set - pay) * price)
        );
    }

    #[test]
    fn prop_bulk_discount_zero_below_threshold(
        threshold in 1u32..50,
        quantity in 0u32..100,
    ) {
        let catalog = build_catalog(&[54_999, 139_999, 10_950, 3_000]);
        let rule =
            BulkDiscount::new(Arc::clone(&catalog), "ipd", threshold, Money::from_cents(49_999))
                .unwrap();
        let snapshot = CartSnapshot::from_lines([CartLine::new("ipd", quantity)]);

        let adjustment = rule.apply(&snapshot).unwrap();
        if quantity < threshold {
            prop_assert!(adjustment.is_zero());
        } else {
            prop_assert_eq!(adjustment.cents(), -i64::from(quantity) * 5_000);
        }
    }
}
