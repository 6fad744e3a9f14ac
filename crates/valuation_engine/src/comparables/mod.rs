//! Comparable-company multiples valuation.
//!
//! [`MultiplesAggregator`] collects peer multiples, ranks them into
//! quartile bands per metric, applies each band to the subject's base
//! metric, and reconciles the per-metric medians into one aggregate
//! estimate.

pub mod aggregator;

pub use aggregator::{
    ComparablesResult, ImpliedValuation, MultiplesAggregator, SkipReason, SkippedMetric,
};
