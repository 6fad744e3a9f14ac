//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValuationError`: Errors from a valuation run (resolution, projection, aggregation)
//! - `ValuationStage`: The stage of a run an error is attributed to
//! - `SnapshotError`: Errors from fundamentals snapshot construction
//! - `CurrencyError`: Errors from currency parsing
//! - `MultipleParseError`: Errors from multiple-kind parsing

use std::fmt;
use thiserror::Error;

use super::multiple::MultipleKind;

/// The stage of a valuation run that produced a failure.
///
/// Used by the coordinator when a whole-run failure has to be attributed
/// to the step that raised it.
///
/// # Variants
/// - `AssumptionResolution`: Filling and validating assumption inputs
/// - `DcfProjection`: Forecasting and discounting free cash flows
/// - `ComparablesAggregation`: Combining peer multiples
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValuationStage {
    /// Filling and validating assumption inputs.
    AssumptionResolution,
    /// Forecasting and discounting free cash flows.
    DcfProjection,
    /// Combining peer multiples into an implied range.
    ComparablesAggregation,
}

impl ValuationStage {
    /// Returns the human-readable stage name.
    pub fn name(&self) -> &'static str {
        match self {
            ValuationStage::AssumptionResolution => "assumption resolution",
            ValuationStage::DcfProjection => "DCF projection",
            ValuationStage::ComparablesAggregation => "comparables aggregation",
        }
    }
}

impl fmt::Display for ValuationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Categorised valuation run errors.
///
/// Provides structured error handling for assumption resolution, DCF
/// projection and comparables aggregation with descriptive context for
/// each failure mode.
///
/// # Variants
/// - `Configuration`: Invalid or contradictory assumptions
/// - `MissingAssumption`: No value supplied and no defined default
/// - `InsufficientPeers`: No peer data for a requested metric
/// - `Computation`: Numeric invariant violated during calculation
/// - `Stage`: A failure wrapped with the run stage that raised it
///
/// # Examples
/// ```
/// use valuation_core::types::error::ValuationError;
///
/// let err = ValuationError::configuration("WACC must exceed terminal growth");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid configuration: WACC must exceed terminal growth"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValuationError {
    /// Invalid or contradictory assumptions.
    #[error("Invalid configuration: {reason}")]
    Configuration {
        /// Description of the contradiction.
        reason: String,
    },

    /// A required assumption has no value and no defined default.
    #[error("Missing assumption with no default: {field}")]
    MissingAssumption {
        /// The name of the missing assumption field.
        field: &'static str,
    },

    /// No peer data is available for a requested metric.
    #[error("Insufficient peers: no usable {metric} multiples")]
    InsufficientPeers {
        /// The metric the peer set was empty for.
        metric: MultipleKind,
    },

    /// A numeric invariant was violated during calculation.
    #[error("Computation failed: {reason}")]
    Computation {
        /// Description of the violated invariant.
        reason: String,
    },

    /// A failure attributed to the valuation stage that raised it.
    #[error("{stage} failed: {source}")]
    Stage {
        /// The stage the failure occurred in.
        stage: ValuationStage,
        /// The underlying failure.
        #[source]
        source: Box<ValuationError>,
    },
}

impl ValuationError {
    /// Create a configuration error.
    ///
    /// # Arguments
    /// * `reason` - Description of the invalid configuration
    pub fn configuration(reason: impl Into<String>) -> Self {
        ValuationError::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a missing-assumption error.
    ///
    /// # Arguments
    /// * `field` - Name of the assumption with no value and no default
    pub fn missing(field: &'static str) -> Self {
        ValuationError::MissingAssumption { field }
    }

    /// Create a computation error.
    ///
    /// # Arguments
    /// * `reason` - Description of the violated numeric invariant
    pub fn computation(reason: impl Into<String>) -> Self {
        ValuationError::Computation {
            reason: reason.into(),
        }
    }

    /// Wrap this error with the run stage that raised it.
    ///
    /// Already-wrapped errors are returned unchanged so a failure keeps
    /// the stage closest to its origin.
    ///
    /// # Examples
    /// ```
    /// use valuation_core::types::error::{ValuationError, ValuationStage};
    ///
    /// let err = ValuationError::computation("terminal cash flow is not positive")
    ///     .at_stage(ValuationStage::DcfProjection);
    /// assert_eq!(err.stage(), Some(ValuationStage::DcfProjection));
    /// ```
    pub fn at_stage(self, stage: ValuationStage) -> Self {
        match self {
            ValuationError::Stage { .. } => self,
            other => ValuationError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Returns the stage attribution, if any.
    pub fn stage(&self) -> Option<ValuationStage> {
        match self {
            ValuationError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Check if the error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.root(), ValuationError::Configuration { .. })
    }

    /// Check if the error is a missing-assumption error.
    pub fn is_missing_assumption(&self) -> bool {
        matches!(self.root(), ValuationError::MissingAssumption { .. })
    }

    /// Check if the error is an insufficient-peers error.
    pub fn is_insufficient_peers(&self) -> bool {
        matches!(self.root(), ValuationError::InsufficientPeers { .. })
    }

    /// Check if the error is a computation error.
    pub fn is_computation(&self) -> bool {
        matches!(self.root(), ValuationError::Computation { .. })
    }

    /// Returns the innermost error, unwrapping any stage attribution.
    pub fn root(&self) -> &ValuationError {
        match self {
            ValuationError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Fundamentals snapshot construction errors.
///
/// Raised by the snapshot builder when the record cannot describe a
/// valuable company. Revenue is the projection base, so it is the one
/// financial field that must be present and positive.
///
/// # Variants
/// - `EmptyTicker`: Ticker symbol is empty
/// - `MissingRevenue`: No trailing revenue supplied
/// - `NonPositiveRevenue`: Trailing revenue is zero or negative
///
/// # Examples
/// ```
/// use valuation_core::types::error::SnapshotError;
///
/// let err = SnapshotError::MissingRevenue { ticker: "ACME".to_string() };
/// assert_eq!(format!("{}", err), "Snapshot for ACME has no trailing revenue");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotError {
    /// Ticker symbol is empty.
    #[error("Snapshot ticker must not be empty")]
    EmptyTicker,

    /// No trailing revenue supplied.
    #[error("Snapshot for {ticker} has no trailing revenue")]
    MissingRevenue {
        /// The ticker the snapshot was built for.
        ticker: String,
    },

    /// Trailing revenue is zero or negative.
    #[error("Snapshot for {ticker} has non-positive revenue {revenue}")]
    NonPositiveRevenue {
        /// The ticker the snapshot was built for.
        ticker: String,
        /// The rejected revenue value.
        revenue: f64,
    },
}

/// Currency-related errors.
///
/// # Variants
/// - `UnknownCurrency`: Unknown currency code
///
/// # Examples
/// ```
/// use valuation_core::types::error::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Multiple-kind parsing errors.
///
/// # Variants
/// - `UnknownKind`: Unknown multiple label
///
/// # Examples
/// ```
/// use valuation_core::types::error::MultipleParseError;
///
/// let err = MultipleParseError::UnknownKind("EV/EBITA".to_string());
/// assert_eq!(format!("{}", err), "Unknown multiple kind: EV/EBITA");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultipleParseError {
    /// Unknown multiple label.
    #[error("Unknown multiple kind: {0}")]
    UnknownKind(String),
}
