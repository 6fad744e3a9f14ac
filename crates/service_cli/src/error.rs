//! CLI error types
//!
//! Wraps every failure the binary can hit (I/O, parsing, valuation)
//! into a single error type so command handlers can use `?` freely.

use thiserror::Error;
use valuation_core::types::{CurrencyError, MultipleParseError, SnapshotError, ValuationError};

/// Errors surfaced by the `fairval` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// A path passed on the command line does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument was malformed or unsupported.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request file could not be parsed as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Peer file could not be parsed as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed as TOML.
    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The valuation engine rejected the request.
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    /// The request named a currency the snapshot model does not know.
    #[error("Unsupported currency: {0}")]
    Currency(#[from] CurrencyError),

    /// The request described a snapshot that fails validation.
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A multiple name could not be parsed.
    #[error("Unknown multiple: {0}")]
    Multiple(#[from] MultipleParseError),
}

/// Convenient result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
