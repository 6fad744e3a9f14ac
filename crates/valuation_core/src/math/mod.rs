//! Numerical routines shared by the valuation engines.
//!
//! This module provides:
//! - `stats`: Order statistics (median, percentiles, quartile summaries) over peer data
//!
//! # Re-exports
//!
//! Commonly used items are re-exported at this module level:
//! - [`median`], [`percentile`], [`Quartiles`] from `stats`

pub mod stats;

// Re-export commonly used items at module level
pub use stats::{median, percentile, Quartiles};
