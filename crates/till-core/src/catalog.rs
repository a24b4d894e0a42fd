//! # Catalog
//!
//! Static mapping from product code to product metadata.
//!
//! Built once from a list of products, then shared read-only (behind an
//! `Arc`) by every pricing rule and the checkout.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// Product catalog managing product data and price lookups.
///
/// ## Duplicate Codes
/// When the same code is supplied twice, the later product wins but keeps
/// the enumeration position of the first one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Indexes `products` by code.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Catalog::default();
        for product in products {
            match catalog.index.get(&product.code) {
                Some(&slot) => catalog.products[slot] = product,
                None => {
                    catalog
                        .index
                        .insert(product.code.clone(), catalog.products.len());
                    catalog.products.push(product);
                }
            }
        }
        catalog
    }

    /// Unit price for `code`.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` when the code is not catalogued.
    pub fn lookup_price(&self, code: &str) -> CoreResult<Money> {
        self.lookup_product(code)
            .map(|p| p.price)
            .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))
    }

    pub fn lookup_product(&self, code: &str) -> Option<&Product> {
        self.index.get(code).map(|&slot| &self.products[slot])
    }

    pub fn has(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All products in insertion order.
    pub fn all_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Catalog::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Catalog {
        Catalog::new([
            Product::new("ipd", "Super iPad", Money::from_cents(54999)),
            Product::new("mbp", "MacBook Pro", Money::from_cents(139999)),
            Product::new("atv", "Apple TV", Money::from_cents(10950)),
            Product::new("vga", "VGA adapter", Money::from_cents(3000)),
        ])
    }

    #[test]
    fn test_lookup_price_returns_exact_unit_price() {
        let catalog = demo();
        for product in catalog.all_products() {
            assert_eq!(catalog.lookup_price(&product.code).unwrap(), product.price);
        }
    }

    #[test]
    fn test_lookup_price_unknown_code() {
        let err = demo().lookup_price("unknown").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(code) if code == "unknown"));
    }

    #[test]
    fn test_lookup_product_and_has() {
        let catalog = demo();
        assert_eq!(catalog.lookup_product("atv").unwrap().name, "Apple TV");
        assert!(catalog.lookup_product("ATV").is_none());
        assert!(catalog.has("vga"));
        assert!(!catalog.has("xyz"));
    }

    #[test]
    fn test_all_products_keeps_insertion_order() {
        let codes: Vec<_> = demo().all_products().map(|p| p.code.clone()).collect();
        assert_eq!(codes, ["ipd", "mbp", "atv", "vga"]);
    }

    #[test]
    fn test_duplicate_code_last_write_wins() {
        let catalog = Catalog::new([
            Product::new("atv", "Apple TV", Money::from_cents(10950)),
            Product::new("vga", "VGA adapter", Money::from_cents(3000)),
            Product::new("atv", "Apple TV 4K", Money::from_cents(12900)),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup_price("atv").unwrap().cents(), 12900);
        assert_eq!(catalog.all_products().next().unwrap().name, "Apple TV 4K");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.lookup_price("ipd").is_err());
    }
}
