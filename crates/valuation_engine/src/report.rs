//! Per-method outcomes and the combined valuation report.

use valuation_core::types::{Currency, ValuationError};

use crate::assumptions::Assumptions;
use crate::comparables::ComparablesResult;
use crate::dcf::DcfResult;

/// Outcome of one valuation methodology.
///
/// A methodology either produced a figure, produced one with caveats,
/// or failed with a typed error. The report keeps all three states so
/// a failure on one side never hides the other side's result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MethodOutcome<T> {
    /// The method ran to completion.
    Succeeded {
        /// The method's result.
        value: T,
    },
    /// The method produced a result with degraded coverage.
    Partial {
        /// The method's result.
        value: T,
        /// Human-readable notes on what was degraded.
        caveats: Vec<String>,
    },
    /// The method failed outright.
    Failed {
        /// The stage-tagged failure.
        error: ValuationError,
    },
}

impl<T> MethodOutcome<T> {
    /// The result, if the method produced one.
    pub fn value(&self) -> Option<&T> {
        match self {
            MethodOutcome::Succeeded { value } | MethodOutcome::Partial { value, .. } => {
                Some(value)
            }
            MethodOutcome::Failed { .. } => None,
        }
    }

    /// The failure, if the method failed.
    pub fn error(&self) -> Option<&ValuationError> {
        match self {
            MethodOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Caveats attached to a partial result.
    pub fn caveats(&self) -> &[String] {
        match self {
            MethodOutcome::Partial { caveats, .. } => caveats,
            _ => &[],
        }
    }

    /// Whether a result is available.
    pub fn is_usable(&self) -> bool {
        !matches!(self, MethodOutcome::Failed { .. })
    }

    /// Short status label for display.
    pub fn status(&self) -> &'static str {
        match self {
            MethodOutcome::Succeeded { .. } => "ok",
            MethodOutcome::Partial { .. } => "partial",
            MethodOutcome::Failed { .. } => "failed",
        }
    }
}

/// Combined valuation report for one company.
///
/// Produced by [`ValuationCoordinator::run`](crate::coordinator::ValuationCoordinator::run).
/// All monetary figures are in `currency`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValuationReport {
    /// Subject company ticker.
    pub ticker: String,
    /// Reporting currency of every monetary figure.
    pub currency: Currency,
    /// Spot share price at snapshot time, as context for the implied
    /// prices.
    pub spot_share_price: Option<f64>,
    /// The resolved assumption set; absent when resolution failed.
    pub assumptions: Option<Assumptions>,
    /// Intrinsic (DCF) valuation outcome.
    pub dcf: MethodOutcome<DcfResult>,
    /// Relative (comparables) valuation outcome.
    pub comparables: MethodOutcome<ComparablesResult>,
}

impl ValuationReport {
    /// Whether at least one methodology produced a figure.
    pub fn has_any_value(&self) -> bool {
        self.dcf.is_usable() || self.comparables.is_usable()
    }
}
