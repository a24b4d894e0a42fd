//! # Configuration
//!
//! Runtime configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags
//! 2. Environment variables (`TILL_*`)
//! 3. Defaults (this file)

use std::path::PathBuf;

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TillConfig {
    /// Pricing file to load. `None` uses the built-in demo pricing.
    pub pricing_file: Option<PathBuf>,

    /// Keep only the first promotion per (kind, code).
    pub dedupe_promotions: bool,

    /// Emit JSON summaries instead of plain text.
    pub json_output: bool,
}

impl TillConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TILL_PRICING_FILE`: path to a JSON pricing file
    /// - `TILL_DEDUPE_PROMOTIONS`: `true` / `false`
    /// - `TILL_JSON`: `true` / `false`
    pub fn from_env() -> CliResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> CliResult<Self> {
        let mut config = TillConfig::default();

        if let Some(path) = lookup("TILL_PRICING_FILE").filter(|p| !p.trim().is_empty()) {
            config.pricing_file = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup("TILL_DEDUPE_PROMOTIONS") {
            config.dedupe_promotions = parse_flag("TILL_DEDUPE_PROMOTIONS", &value)?;
        }

        if let Some(value) = lookup("TILL_JSON") {
            config.json_output = parse_flag("TILL_JSON", &value)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> CliResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CliError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
