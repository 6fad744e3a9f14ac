//! Caller-supplied assumption overrides.

use valuation_core::types::FundamentalsSnapshot;

/// Partial assumption set supplied by the caller.
///
/// Every field is optional. Whatever the caller leaves as `None` is
/// filled in by [`AssumptionResolver::resolve`] from snapshot-derived
/// ratios or the [`FallbackPolicy`], except for the fields the resolver
/// treats as required (discount rate, terminal growth and the two
/// projection schedules).
///
/// [`AssumptionResolver::resolve`]: crate::assumptions::AssumptionResolver::resolve
/// [`FallbackPolicy`]: crate::assumptions::FallbackPolicy
///
/// # Example
///
/// ```
/// use valuation_engine::assumptions::AssumptionInputs;
///
/// let inputs = AssumptionInputs::new()
///     .with_wacc(0.10)
///     .with_terminal_growth(0.02)
///     .with_revenue_growth(vec![0.08, 0.06, 0.04])
///     .with_ebit_margin(vec![0.12, 0.13, 0.14]);
///
/// assert_eq!(inputs.wacc, Some(0.10));
/// assert!(inputs.tax_rate.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssumptionInputs {
    /// Weighted average cost of capital (decimal, e.g. `0.09`).
    pub wacc: Option<f64>,
    /// Perpetuity growth rate for the terminal value.
    pub terminal_growth: Option<f64>,
    /// Year-by-year revenue growth rates. The length sets the
    /// projection horizon.
    pub revenue_growth: Option<Vec<f64>>,
    /// Year-by-year EBIT margins. Must match the growth schedule length.
    pub ebit_margin: Option<Vec<f64>>,
    /// Effective tax rate on EBIT.
    pub tax_rate: Option<f64>,
    /// Net working capital as a share of revenue.
    pub nwc_pct: Option<f64>,
    /// Depreciation and amortisation as a share of revenue.
    pub d_and_a_pct: Option<f64>,
    /// Capital expenditure as a share of revenue in year one; tapers
    /// towards the D&A share over the horizon.
    pub capex_pct: Option<f64>,
    /// Explicit year-by-year capital expenditure shares. Overrides the
    /// taper when present.
    pub capex_schedule: Option<Vec<f64>>,
}

impl AssumptionInputs {
    /// Discount rate assumed when inferring inputs (9%).
    pub const INFERRED_WACC: f64 = 0.09;
    /// Terminal growth assumed when inferring inputs (2%).
    pub const INFERRED_TERMINAL_GROWTH: f64 = 0.02;
    /// Annual revenue growth assumed when inferring inputs (6%).
    pub const INFERRED_REVENUE_GROWTH: f64 = 0.06;
    /// Tax rate assumed when the snapshot carries none (22%).
    pub const INFERRED_TAX_RATE: f64 = 0.22;
    /// EBIT margin assumed when the snapshot supports no estimate (15%).
    pub const INFERRED_EBIT_MARGIN: f64 = 0.15;
    /// Upper bound applied to inferred EBIT margins (50%).
    pub const EBIT_MARGIN_CAP: f64 = 0.50;
    /// Projection horizon used by inference (five years).
    pub const INFERRED_HORIZON_YEARS: usize = 5;

    /// Create an empty input set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the discount rate.
    pub fn with_wacc(mut self, wacc: f64) -> Self {
        self.wacc = Some(wacc);
        self
    }

    /// Set the terminal growth rate.
    pub fn with_terminal_growth(mut self, terminal_growth: f64) -> Self {
        self.terminal_growth = Some(terminal_growth);
        self
    }

    /// Set the year-by-year revenue growth schedule.
    pub fn with_revenue_growth(mut self, revenue_growth: Vec<f64>) -> Self {
        self.revenue_growth = Some(revenue_growth);
        self
    }

    /// Set the year-by-year EBIT margin schedule.
    pub fn with_ebit_margin(mut self, ebit_margin: Vec<f64>) -> Self {
        self.ebit_margin = Some(ebit_margin);
        self
    }

    /// Set the effective tax rate.
    pub fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Set the net working capital share of revenue.
    pub fn with_nwc_pct(mut self, nwc_pct: f64) -> Self {
        self.nwc_pct = Some(nwc_pct);
        self
    }

    /// Set the depreciation and amortisation share of revenue.
    pub fn with_d_and_a_pct(mut self, d_and_a_pct: f64) -> Self {
        self.d_and_a_pct = Some(d_and_a_pct);
        self
    }

    /// Set the year-one capital expenditure share of revenue.
    pub fn with_capex_pct(mut self, capex_pct: f64) -> Self {
        self.capex_pct = Some(capex_pct);
        self
    }

    /// Set an explicit capital expenditure schedule.
    pub fn with_capex_schedule(mut self, capex_schedule: Vec<f64>) -> Self {
        self.capex_schedule = Some(capex_schedule);
        self
    }

    /// Infer a complete input set from a snapshot alone.
    ///
    /// This is the zero-configuration path for screening runs: a flat
    /// five-year growth schedule at [`Self::INFERRED_REVENUE_GROWTH`], a
    /// constant margin estimated from the snapshot (EBIT over revenue,
    /// falling back to EBITDA less D&A, then to
    /// [`Self::INFERRED_EBIT_MARGIN`]) and clamped to
    /// `[0, EBIT_MARGIN_CAP]`, plus the inferred discount, terminal
    /// growth and tax constants. Ratio fields are left unset so the
    /// resolver derives them from the same snapshot.
    ///
    /// # Example
    ///
    /// ```
    /// use valuation_core::types::{Currency, FundamentalsSnapshot};
    /// use valuation_engine::assumptions::AssumptionInputs;
    ///
    /// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
    ///     .revenue(8_000.0)
    ///     .ebit(1_200.0)
    ///     .build()
    ///     .unwrap();
    ///
    /// let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);
    /// assert_eq!(inputs.wacc, Some(AssumptionInputs::INFERRED_WACC));
    /// assert_eq!(inputs.ebit_margin.as_ref().map(Vec::len), Some(5));
    /// ```
    pub fn infer_from_snapshot(snapshot: &FundamentalsSnapshot) -> Self {
        let margin = snapshot
            .ebit_margin()
            .or_else(|| match (snapshot.ebitda(), snapshot.d_and_a()) {
                (Some(ebitda), Some(d_and_a)) => Some((ebitda - d_and_a) / snapshot.revenue()),
                _ => None,
            })
            .filter(|m| m.is_finite())
            .unwrap_or(Self::INFERRED_EBIT_MARGIN)
            .clamp(0.0, Self::EBIT_MARGIN_CAP);

        Self {
            wacc: Some(Self::INFERRED_WACC),
            terminal_growth: Some(Self::INFERRED_TERMINAL_GROWTH),
            revenue_growth: Some(vec![
                Self::INFERRED_REVENUE_GROWTH;
                Self::INFERRED_HORIZON_YEARS
            ]),
            ebit_margin: Some(vec![margin; Self::INFERRED_HORIZON_YEARS]),
            tax_rate: snapshot.tax_rate().or(Some(Self::INFERRED_TAX_RATE)),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation_core::types::Currency;

    fn snapshot_with(f: impl FnOnce(valuation_core::types::FundamentalsBuilder) -> valuation_core::types::FundamentalsBuilder) -> FundamentalsSnapshot {
        f(FundamentalsSnapshot::builder("ACME", Currency::USD).revenue(10_000.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let inputs = AssumptionInputs::new();
        assert_eq!(inputs, AssumptionInputs::default());
        assert!(inputs.wacc.is_none());
        assert!(inputs.revenue_growth.is_none());
        assert!(inputs.capex_schedule.is_none());
    }

    #[test]
    fn test_with_chainers() {
        let inputs = AssumptionInputs::new()
            .with_wacc(0.08)
            .with_terminal_growth(0.02)
            .with_revenue_growth(vec![0.05, 0.04])
            .with_ebit_margin(vec![0.15, 0.16])
            .with_tax_rate(0.21)
            .with_nwc_pct(0.12)
            .with_d_and_a_pct(0.045)
            .with_capex_pct(0.07)
            .with_capex_schedule(vec![0.07, 0.05]);

        assert_eq!(inputs.wacc, Some(0.08));
        assert_eq!(inputs.terminal_growth, Some(0.02));
        assert_eq!(inputs.revenue_growth, Some(vec![0.05, 0.04]));
        assert_eq!(inputs.ebit_margin, Some(vec![0.15, 0.16]));
        assert_eq!(inputs.tax_rate, Some(0.21));
        assert_eq!(inputs.nwc_pct, Some(0.12));
        assert_eq!(inputs.d_and_a_pct, Some(0.045));
        assert_eq!(inputs.capex_pct, Some(0.07));
        assert_eq!(inputs.capex_schedule, Some(vec![0.07, 0.05]));
    }

    // ================================================================
    // Inference from a snapshot
    // ================================================================

    #[test]
    fn test_infer_margin_from_ebit() {
        let snapshot = snapshot_with(|b| b.ebit(1_500.0));
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        let margins = inputs.ebit_margin.unwrap();
        assert_eq!(margins.len(), AssumptionInputs::INFERRED_HORIZON_YEARS);
        for m in margins {
            assert!((m - 0.15).abs() < 1e-12);
        }
    }

    #[test]
    fn test_infer_margin_is_capped() {
        let snapshot = snapshot_with(|b| b.ebit(6_000.0));
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        let margins = inputs.ebit_margin.unwrap();
        assert!((margins[0] - AssumptionInputs::EBIT_MARGIN_CAP).abs() < 1e-12);
    }

    #[test]
    fn test_infer_negative_margin_floors_at_zero() {
        let snapshot = snapshot_with(|b| b.ebit(-500.0));
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        let margins = inputs.ebit_margin.unwrap();
        assert_eq!(margins[0], 0.0);
    }

    #[test]
    fn test_infer_margin_from_ebitda_less_d_and_a() {
        let snapshot = snapshot_with(|b| b.ebitda(2_000.0).d_and_a(400.0));
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        let margins = inputs.ebit_margin.unwrap();
        assert!((margins[0] - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_infer_margin_default_when_snapshot_is_bare() {
        let snapshot = snapshot_with(|b| b);
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        let margins = inputs.ebit_margin.unwrap();
        assert!((margins[0] - AssumptionInputs::INFERRED_EBIT_MARGIN).abs() < 1e-12);
    }

    #[test]
    fn test_infer_uses_snapshot_tax_rate_when_present() {
        let snapshot = snapshot_with(|b| b.tax_rate(0.28));
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);
        assert_eq!(inputs.tax_rate, Some(0.28));
    }

    #[test]
    fn test_infer_tax_rate_fallback() {
        let snapshot = snapshot_with(|b| b);
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);
        assert_eq!(inputs.tax_rate, Some(AssumptionInputs::INFERRED_TAX_RATE));
    }

    #[test]
    fn test_infer_constant_growth_over_five_years() {
        let snapshot = snapshot_with(|b| b);
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        let growth = inputs.revenue_growth.unwrap();
        assert_eq!(growth.len(), 5);
        for g in growth {
            assert!((g - AssumptionInputs::INFERRED_REVENUE_GROWTH).abs() < 1e-12);
        }
        assert_eq!(
            inputs.terminal_growth,
            Some(AssumptionInputs::INFERRED_TERMINAL_GROWTH)
        );
        assert_eq!(inputs.wacc, Some(AssumptionInputs::INFERRED_WACC));
    }

    #[test]
    fn test_infer_leaves_ratio_fields_unset() {
        let snapshot = snapshot_with(|b| b.capex(500.0).d_and_a(400.0));
        let inputs = AssumptionInputs::infer_from_snapshot(&snapshot);

        assert!(inputs.nwc_pct.is_none());
        assert!(inputs.d_and_a_pct.is_none());
        assert!(inputs.capex_pct.is_none());
        assert!(inputs.capex_schedule.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_deserialisation_defaults_missing_fields() {
        let inputs: AssumptionInputs =
            serde_json::from_str(r#"{"wacc": 0.1, "terminal_growth": 0.02}"#).unwrap();
        assert_eq!(inputs.wacc, Some(0.1));
        assert_eq!(inputs.terminal_growth, Some(0.02));
        assert!(inputs.revenue_growth.is_none());
        assert!(inputs.tax_rate.is_none());
    }
}
