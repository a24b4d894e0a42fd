//! # Pricing Files
//!
//! JSON description of a catalog and its promotions.
//!
//! ## Format
//! ```json
//! {
//!   "products": [
//!     { "code": "ipd", "name": "Super iPad", "price": "549.99" },
//!     { "code": "atv", "name": "Apple TV", "price": "109.50" }
//!   ],
//!   "promotions": [
//!     { "type": "buy_x_get_y_free", "code": "atv", "set_quantity": 3, "pay_quantity": 2 },
//!     { "type": "bulk_discount", "code": "ipd", "threshold": 4, "discounted_price": "499.99" }
//!   ]
//! }
//! ```
//! Prices are decimal strings so they never pass through a float.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use till_core::validation::{validate_code, validate_product, validate_products, validate_quantity};
use till_core::{BulkDiscount, BuyXGetYFree, Catalog, Money, Product, SharedRule};
use tracing::debug;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingFile {
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductEntry {
    pub code: String,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum PromotionEntry {
    BulkDiscount {
        code: String,
        threshold: u32,
        discounted_price: String,
    },
    BuyXGetYFree {
        code: String,
        set_quantity: u32,
        pay_quantity: u32,
    },
}

impl PricingFile {
    /// Reads and parses `path`.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadPricing {
            path: path.to_path_buf(),
            source,
        })?;
        let file: PricingFile =
            serde_json::from_str(&text).map_err(|source| CliError::ParsePricing {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %path.display(),
            products = file.products.len(),
            promotions = file.promotions.len(),
            "Loaded pricing file"
        );
        Ok(file)
    }

    /// The built-in store: four products, Apple TV 3-for-2 and Super iPad
    /// bulk pricing from four units.
    pub fn demo() -> Self {
        let product = |code: &str, name: &str, price: &str| ProductEntry {
            code: code.to_string(),
            name: name.to_string(),
            price: price.to_string(),
        };

        PricingFile {
            products: vec![
                product("ipd", "Super iPad", "549.99"),
                product("mbp", "MacBook Pro", "1399.99"),
                product("atv", "Apple TV", "109.50"),
                product("vga", "VGA adapter", "30.00"),
            ],
            promotions: vec![
                PromotionEntry::BuyXGetYFree {
                    code: "atv".to_string(),
                    set_quantity: 3,
                    pay_quantity: 2,
                },
                PromotionEntry::BulkDiscount {
                    code: "ipd".to_string(),
                    threshold: 4,
                    discounted_price: "499.99".to_string(),
                },
            ],
        }
    }

    /// Validates every product and builds the catalog.
    pub fn catalog(&self) -> CliResult<Arc<Catalog>> {
        let mut products = Vec::with_capacity(self.products.len());
        for entry in &self.products {
            let invalid = |source| CliError::InvalidProduct {
                code: entry.code.clone(),
                source,
            };
            let price: Money = entry.price.parse().map_err(invalid)?;
            let product = Product::new(&entry.code, &entry.name, price);
            validate_product(&product).map_err(invalid)?;
            products.push(product);
        }
        validate_products(&products)?;

        Ok(Arc::new(Catalog::new(products)))
    }

    /// Builds the promotional rules bound to `catalog`.
    ///
    /// Codes are only format-checked here; a promotion for a code the
    /// catalog lacks is left for the composer to skip and report.
    pub fn promotions(&self, catalog: &Arc<Catalog>) -> CliResult<Vec<SharedRule>> {
        self.promotions
            .iter()
            .map(|entry| entry.build(catalog))
            .collect()
    }
}

impl PromotionEntry {
    fn build(&self, catalog: &Arc<Catalog>) -> CliResult<SharedRule> {
        let rule: SharedRule = match self {
            PromotionEntry::BulkDiscount {
                code,
                threshold,
                discounted_price,
            } => {
                validate_code(code)?;
                validate_quantity("threshold", *threshold)?;
                let discounted_price: Money = discounted_price.parse()?;
                Arc::new(BulkDiscount::new(
                    Arc::clone(catalog),
                    code,
                    *threshold,
                    discounted_price,
                )?)
            }
            PromotionEntry::BuyXGetYFree {
                code,
                set_quantity,
                pay_quantity,
            } => {
                validate_code(code)?;
                validate_quantity("set_quantity", *set_quantity)?;
                Arc::new(BuyXGetYFree::new(
                    Arc::clone(catalog),
                    code,
                    *set_quantity,
                    *pay_quantity,
                )?)
            }
        };
        Ok(rule)
    }
}
