//! Enterprise-value multiple types.
//!
//! This module provides the metric tags for comparable-company multiples
//! and the per-peer multiple observation record.
//!
//! A multiple is the dimensionless ratio of a peer's enterprise value to
//! one of its financial metrics. Applied to the subject company's own
//! value of that metric it implies the subject's enterprise value.
//!
//! # Examples
//!
//! ```
//! use valuation_core::types::multiple::{MultipleKind, PeerMultiple};
//!
//! let peer = PeerMultiple::new("RIVL", MultipleKind::EvToEbitda, 8.4);
//! assert_eq!(peer.kind.name(), "EV/EBITDA");
//! assert!(peer.is_usable());
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::MultipleParseError;

/// The financial metric an enterprise-value multiple divides by.
///
/// # Variants
/// - `EvToRevenue`: Enterprise value over trailing revenue
/// - `EvToEbit`: Enterprise value over trailing EBIT
/// - `EvToEbitda`: Enterprise value over trailing EBITDA
///
/// # Examples
///
/// ```
/// use valuation_core::types::multiple::MultipleKind;
///
/// assert_eq!(MultipleKind::EvToRevenue.name(), "EV/Revenue");
///
/// // Parse from string (case-insensitive, slash or snake form)
/// let kind: MultipleKind = "ev/ebitda".parse().unwrap();
/// assert_eq!(kind, MultipleKind::EvToEbitda);
/// let kind: MultipleKind = "ev_to_ebit".parse().unwrap();
/// assert_eq!(kind, MultipleKind::EvToEbit);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultipleKind {
    /// Enterprise value over trailing revenue.
    EvToRevenue,

    /// Enterprise value over trailing EBIT.
    EvToEbit,

    /// Enterprise value over trailing EBITDA.
    EvToEbitda,
}

impl MultipleKind {
    /// All supported multiple kinds, in reporting order.
    pub const ALL: [MultipleKind; 3] = [
        MultipleKind::EvToRevenue,
        MultipleKind::EvToEbit,
        MultipleKind::EvToEbitda,
    ];

    /// Returns the conventional label for this multiple.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_core::types::multiple::MultipleKind;
    ///
    /// assert_eq!(MultipleKind::EvToRevenue.name(), "EV/Revenue");
    /// assert_eq!(MultipleKind::EvToEbit.name(), "EV/EBIT");
    /// assert_eq!(MultipleKind::EvToEbitda.name(), "EV/EBITDA");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            MultipleKind::EvToRevenue => "EV/Revenue",
            MultipleKind::EvToEbit => "EV/EBIT",
            MultipleKind::EvToEbitda => "EV/EBITDA",
        }
    }

    /// Returns the name of the base metric the multiple divides by.
    ///
    /// Used in messages when the subject company's base value is missing
    /// or non-positive.
    pub fn base_metric(&self) -> &'static str {
        match self {
            MultipleKind::EvToRevenue => "revenue",
            MultipleKind::EvToEbit => "EBIT",
            MultipleKind::EvToEbitda => "EBITDA",
        }
    }
}

impl FromStr for MultipleKind {
    type Err = MultipleParseError;

    /// Parses a multiple label (case-insensitive).
    ///
    /// Accepts both the conventional slash form (`EV/EBITDA`) and the
    /// snake form used in CSV headers (`ev_to_ebitda`).
    fn from_str(s: &str) -> Result<Self, MultipleParseError> {
        match s.to_uppercase().as_str() {
            "EV/REVENUE" | "EV_TO_REVENUE" | "EV/REV" => Ok(MultipleKind::EvToRevenue),
            "EV/EBIT" | "EV_TO_EBIT" => Ok(MultipleKind::EvToEbit),
            "EV/EBITDA" | "EV_TO_EBITDA" => Ok(MultipleKind::EvToEbitda),
            _ => Err(MultipleParseError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for MultipleKind {
    /// Formats as the conventional label.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One comparable company's observed multiple.
///
/// Supplied by the external comparable-selection collaborator, tagged
/// with the metric it applies to and the peer's ticker. The record is a
/// plain observation; filtering and aggregation happen in the engine
/// layer.
///
/// # Examples
///
/// ```
/// use valuation_core::types::multiple::{MultipleKind, PeerMultiple};
///
/// let peer = PeerMultiple::new("RIVL", MultipleKind::EvToEbit, 11.2);
/// assert_eq!(peer.ticker, "RIVL");
/// assert_eq!(peer.value, 11.2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerMultiple {
    /// The peer company's ticker symbol.
    pub ticker: String,

    /// The metric this multiple applies to.
    pub kind: MultipleKind,

    /// The observed multiple value.
    pub value: f64,
}

impl PeerMultiple {
    /// Create a new peer multiple observation.
    ///
    /// # Arguments
    ///
    /// * `ticker` - The peer company's ticker symbol
    /// * `kind` - The metric the multiple applies to
    /// * `value` - The observed multiple value
    pub fn new(ticker: impl Into<String>, kind: MultipleKind, value: f64) -> Self {
        Self {
            ticker: ticker.into(),
            kind,
            value,
        }
    }

    /// Returns whether the observation can enter aggregation.
    ///
    /// Non-finite observations (a peer with missing or degenerate data
    /// upstream) are dropped before any statistic is computed.
    pub fn is_usable(&self) -> bool {
        self.value.is_finite()
    }
}
