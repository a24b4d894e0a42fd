//! CLI error type.
//!
//! Wraps the core errors and adds the I/O and parsing failures that only
//! exist at the edge of the system.

use std::path::PathBuf;

use thiserror::Error;
use till_core::{CoreError, ValidationError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("Failed to read pricing file {path}")]
    ReadPricing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pricing file {path}")]
    ParsePricing {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid product {code:?}")]
    InvalidProduct {
        code: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type CliResult<T> = Result<T, CliError>;
