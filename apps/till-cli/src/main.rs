//! # till
//!
//! Command-line checkout over `till-core`.
//!
//! ```text
//! $ till scan atv atv atv vga
//! Total: $249.00
//! ```
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show rule composition and evaluation
//! - Default: `warn,till=info` (ignored scans and skipped rules are warnings)

mod cli;
mod config;
mod error;
mod pricing;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use till_core::{compose_with, Checkout, ComposeOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::TillConfig;
use crate::pricing::PricingFile;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply_to(TillConfig::from_env().context("Invalid environment")?);

    let pricing = match &config.pricing_file {
        Some(path) => PricingFile::load(path)?,
        None => PricingFile::demo(),
    };

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Catalog => list_catalog(&pricing, &config, &mut stdout),
        Command::Scan { codes } => scan(&pricing, &config, &codes, &mut stdout),
    }
}

/// Writes every product of the active catalog to `out`.
fn list_catalog(
    pricing: &PricingFile,
    config: &TillConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = pricing.catalog().context("Invalid catalog")?;

    if config.json_output {
        let products: Vec<_> = catalog.all_products().collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&products)?)?;
    } else {
        for product in catalog.all_products() {
            writeln!(
                out,
                "{:<10} {:<30} {:>12}",
                product.code,
                product.name,
                product.price.to_string()
            )?;
        }
    }
    Ok(())
}

/// Scans `codes` in order and writes the total (or the JSON summary) to `out`.
fn scan(
    pricing: &PricingFile,
    config: &TillConfig,
    codes: &[String],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = pricing.catalog().context("Invalid catalog")?;
    let promotions = pricing.promotions(&catalog).context("Invalid promotion")?;
    let options = ComposeOptions {
        dedupe_promotions: config.dedupe_promotions,
    };
    let rules = compose_with(&catalog, promotions, options);

    let mut checkout = Checkout::new(rules, catalog);
    info!(session = %checkout.session_id(), items = codes.len(), "Scanning");
    for code in codes {
        checkout.scan(code);
    }

    if config.json_output {
        let summary = checkout.summary()?;
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(out, "Total: {}", checkout.total()?)?;
    }
    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// parseable with `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,till=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
