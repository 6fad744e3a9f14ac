//! Core financial types for company valuation.
//!
//! This module provides:
//! - `currency`: ISO 4217 currency codes with metadata
//! - `error`: Structured error types for valuation runs, snapshot construction, and currency parsing
//! - `fundamentals`: Immutable snapshot of a company's trailing financials
//! - `multiple`: Enterprise-value multiple kinds and peer multiple observations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Currency`] from `currency`
//! - [`ValuationError`], [`SnapshotError`], [`CurrencyError`] from `error`
//! - [`FundamentalsSnapshot`], [`FundamentalsBuilder`] from `fundamentals`
//! - [`MultipleKind`], [`PeerMultiple`] from `multiple`

pub mod currency;
pub mod error;
pub mod fundamentals;
pub mod multiple;

// Re-export commonly used types at module level
pub use currency::Currency;
pub use error::{
    CurrencyError, MultipleParseError, SnapshotError, ValuationError, ValuationStage,
};
pub use fundamentals::{FundamentalsBuilder, FundamentalsSnapshot};
pub use multiple::{MultipleKind, PeerMultiple};
