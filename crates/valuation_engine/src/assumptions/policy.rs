//! Named fallback constants for assumption resolution.

/// Fallback constants applied when neither the caller nor the snapshot
/// can supply an assumption.
///
/// Every default the resolver may silently apply is a named field here,
/// so the provenance of a valuation run stays inspectable. A policy is
/// plain data: construct one, tweak a field, hand it to
/// [`AssumptionResolver::new`](crate::assumptions::AssumptionResolver::new).
///
/// # Example
///
/// ```
/// use valuation_engine::assumptions::FallbackPolicy;
///
/// let policy = FallbackPolicy::default();
/// assert_eq!(policy.nwc_pct, FallbackPolicy::DEFAULT_NWC_PCT);
///
/// let heavy_industry = FallbackPolicy {
///     capex_pct: 0.08,
///     ..FallbackPolicy::default()
/// };
/// assert!(heavy_industry.capex_pct > policy.capex_pct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallbackPolicy {
    /// Net working capital as a share of revenue.
    pub nwc_pct: f64,
    /// Capital expenditure as a share of revenue, used as the taper
    /// start level when no explicit schedule is given.
    pub capex_pct: f64,
    /// Depreciation and amortisation as a share of revenue.
    pub d_and_a_pct: f64,
}

impl FallbackPolicy {
    /// Default net working capital share of revenue (10%).
    pub const DEFAULT_NWC_PCT: f64 = 0.10;
    /// Default capital expenditure share of revenue (6%).
    pub const DEFAULT_CAPEX_PCT: f64 = 0.06;
    /// Default depreciation and amortisation share of revenue (5%).
    pub const DEFAULT_D_AND_A_PCT: f64 = 0.05;

    /// Create a policy with explicit values.
    pub fn new(nwc_pct: f64, capex_pct: f64, d_and_a_pct: f64) -> Self {
        Self {
            nwc_pct,
            capex_pct,
            d_and_a_pct,
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            nwc_pct: Self::DEFAULT_NWC_PCT,
            capex_pct: Self::DEFAULT_CAPEX_PCT,
            d_and_a_pct: Self::DEFAULT_D_AND_A_PCT,
        }
    }
}
