use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::TillConfig;

#[derive(Parser, Debug)]
#[command(name = "till")]
#[command(about = "Price a basket of scanned items against a catalog and its promotions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON pricing file (default: TILL_PRICING_FILE, then the built-in demo store)
    #[arg(long, global = true)]
    pub pricing: Option<PathBuf>,

    /// Keep only the first promotion per kind and product
    #[arg(long, global = true)]
    pub dedupe: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan product codes in order and print the total
    Scan {
        /// Product codes, one per scanned unit
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// List the products and prices of the active catalog
    Catalog,
}

impl Cli {
    /// Applies command-line flags on top of the environment configuration.
    pub fn apply_to(&self, mut config: TillConfig) -> TillConfig {
        if let Some(path) = &self.pricing {
            config.pricing_file = Some(path.clone());
        }
        config.dedupe_promotions |= self.dedupe;
        config.json_output |= self.json;
        config
    }
}
