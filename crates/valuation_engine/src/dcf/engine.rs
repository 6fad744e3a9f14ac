//! Free cash flow projection and discounting.
//!
//! # Model
//!
//! Each projection year applies the resolved schedules to the prior
//! year's revenue:
//!
//! ```text
//! revenueᵢ = revenueᵢ₋₁ × (1 + growthᵢ)
//! EBITᵢ    = revenueᵢ × marginᵢ
//! NOPATᵢ   = EBITᵢ × (1 - tax)
//! FCFᵢ     = NOPATᵢ + D&Aᵢ - CapExᵢ - ΔNWCᵢ
//! PVᵢ      = FCFᵢ / (1 + WACC)ⁱ
//! ```
//!
//! The explicit horizon is capped with a Gordon growth perpetuity on
//! the final projected cash flow:
//!
//! ```text
//! TV     = FCF_N × (1 + g) / (WACC - g)
//! PV(TV) = TV / (1 + WACC)ᴺ
//! ```
//!
//! Enterprise value bridges to equity by subtracting net debt, and to
//! a per-share figure when the snapshot carries a share count.

use valuation_core::types::{FundamentalsSnapshot, ValuationError};

use crate::assumptions::Assumptions;

use super::projection::{DcfResult, ProjectedYear};

/// DCF valuation engine over a snapshot and a resolved assumption set.
///
/// The engine borrows its inputs; it holds no state of its own and a
/// fresh one can be constructed per valuation.
///
/// # Example
///
/// ```
/// use valuation_core::types::{Currency, FundamentalsSnapshot};
/// use valuation_engine::assumptions::{AssumptionInputs, AssumptionResolver, FallbackPolicy};
/// use valuation_engine::dcf::DcfEngine;
///
/// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
///     .revenue(10_000.0)
///     .tax_rate(0.25)
///     .build()
///     .unwrap();
///
/// let inputs = AssumptionInputs::infer_from_snapshot(&snapshot)
///     .with_wacc(0.09)
///     .with_terminal_growth(0.02);
///
/// let assumptions = AssumptionResolver::new(FallbackPolicy::default())
///     .resolve(&snapshot, &inputs)
///     .unwrap();
///
/// let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();
/// assert_eq!(valuation.horizon(), 5);
/// assert!(valuation.enterprise_value > 0.0);
/// ```
pub struct DcfEngine<'a> {
    /// Company fundamentals anchoring the projection.
    snapshot: &'a FundamentalsSnapshot,
    /// Fully resolved assumption set.
    assumptions: &'a Assumptions,
}

impl<'a> DcfEngine<'a> {
    /// Create an engine over a snapshot and resolved assumptions.
    pub fn new(snapshot: &'a FundamentalsSnapshot, assumptions: &'a Assumptions) -> Self {
        Self {
            snapshot,
            assumptions,
        }
    }

    /// Run the full valuation: project, discount, cap with a terminal
    /// value, and bridge to equity.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::Configuration`] if the assumption set has a
    ///   zero-year horizon or schedules of unequal length
    /// - [`ValuationError::Computation`] if the discount rate does not
    ///   exceed terminal growth, if the terminal-year free cash flow is
    ///   not positive, or if the result overflows
    pub fn value(&self) -> Result<DcfResult, ValuationError> {
        let assumptions = self.assumptions;
        let horizon = assumptions.horizon();
        if horizon == 0 {
            return Err(ValuationError::configuration(
                "assumption set has a zero-year horizon",
            ));
        }
        // The resolver guarantees equal lengths for its own output; a
        // hand-built assumption set gets the same check here.
        if assumptions.ebit_margin.len() != horizon || assumptions.capex_pct.len() != horizon {
            return Err(ValuationError::configuration(format!(
                "schedule lengths disagree: {} growth, {} margin, {} capex entries",
                horizon,
                assumptions.ebit_margin.len(),
                assumptions.capex_pct.len()
            )));
        }
        if assumptions.wacc <= assumptions.terminal_growth {
            return Err(ValuationError::computation(format!(
                "discount rate ({}) does not exceed terminal growth ({})",
                assumptions.wacc, assumptions.terminal_growth
            )));
        }

        let years = self.project(horizon);
        let pv_explicit: f64 = years.iter().map(|y| y.present_value).sum();

        let final_year = &years[horizon - 1];
        let terminal_value = self.terminal_value(final_year.fcf)?;
        let pv_terminal = terminal_value * final_year.discount_factor;

        let enterprise_value = pv_explicit + pv_terminal;
        if !enterprise_value.is_finite() {
            return Err(ValuationError::computation("enterprise value is not finite"));
        }

        let equity_value = enterprise_value - self.snapshot.net_debt();
        let implied_share_price = self
            .snapshot
            .shares_outstanding()
            .filter(|shares| *shares > 0.0)
            .map(|shares| equity_value / shares);

        Ok(DcfResult {
            years,
            pv_explicit,
            pv_terminal,
            terminal_value,
            enterprise_value,
            equity_value,
            implied_share_price,
        })
    }

    /// Roll the schedules forward from the snapshot's revenue.
    fn project(&self, horizon: usize) -> Vec<ProjectedYear> {
        let assumptions = self.assumptions;
        let mut years = Vec::with_capacity(horizon);
        let mut prior_revenue = self.snapshot.revenue();

        for i in 0..horizon {
            let revenue = prior_revenue * (1.0 + assumptions.revenue_growth[i]);
            let ebit = revenue * assumptions.ebit_margin[i];
            let nopat = ebit * (1.0 - assumptions.tax_rate);
            let d_and_a = revenue * assumptions.d_and_a_pct;
            let capex = revenue * assumptions.capex_pct[i];
            let nwc_change = (revenue - prior_revenue) * assumptions.nwc_pct;
            let fcf = nopat + d_and_a - capex - nwc_change;
            let discount_factor = (1.0 + assumptions.wacc).powi(-(i as i32 + 1));
            let present_value = fcf * discount_factor;

            years.push(ProjectedYear {
                year: i + 1,
                revenue,
                ebit,
                nopat,
                d_and_a,
                capex,
                nwc_change,
                fcf,
                discount_factor,
                present_value,
            });
            prior_revenue = revenue;
        }
        years
    }

    /// Gordon growth perpetuity on the final projected cash flow.
    ///
    /// The perpetuity is undefined for a non-positive cash flow; a
    /// loss-making terminal year must surface as an error rather than
    /// a negative "value of future growth".
    fn terminal_value(&self, final_fcf: f64) -> Result<f64, ValuationError> {
        if final_fcf <= 0.0 {
            return Err(ValuationError::computation(format!(
                "terminal-year free cash flow ({final_fcf:.2}) is not positive; \
                 a growing perpetuity is undefined"
            )));
        }
        let assumptions = self.assumptions;
        Ok(final_fcf * (1.0 + assumptions.terminal_growth)
            / (assumptions.wacc - assumptions.terminal_growth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{AssumptionInputs, AssumptionResolver, FallbackPolicy};
    use approx::assert_relative_eq;
    use valuation_core::types::Currency;

    fn resolver() -> AssumptionResolver {
        AssumptionResolver::new(FallbackPolicy::default())
    }

    fn golden_snapshot() -> FundamentalsSnapshot {
        FundamentalsSnapshot::builder("ACME", Currency::USD)
            .revenue(10_000.0)
            .ebit(1_500.0)
            .d_and_a(400.0)
            .capex(500.0)
            .net_working_capital(0.0)
            .tax_rate(0.25)
            .build()
            .unwrap()
    }

    fn golden_inputs() -> AssumptionInputs {
        AssumptionInputs::new()
            .with_wacc(0.09)
            .with_terminal_growth(0.025)
            .with_revenue_growth(vec![0.05; 5])
            .with_ebit_margin(vec![0.15; 5])
    }

    fn golden_valuation() -> DcfResult {
        let snapshot = golden_snapshot();
        let assumptions = resolver().resolve(&snapshot, &golden_inputs()).unwrap();
        DcfEngine::new(&snapshot, &assumptions).value().unwrap()
    }

    // ================================================================
    // Golden five-year scenario
    // ================================================================

    #[test]
    fn test_golden_first_year_row() {
        let valuation = golden_valuation();
        let year = &valuation.years[0];

        assert_eq!(year.year, 1);
        assert_relative_eq!(year.revenue, 10_500.0, max_relative = 1e-12);
        assert_relative_eq!(year.ebit, 1_575.0, max_relative = 1e-12);
        assert_relative_eq!(year.nopat, 1_181.25, max_relative = 1e-12);
        assert_relative_eq!(year.d_and_a, 420.0, max_relative = 1e-12);
        assert_relative_eq!(year.capex, 504.0, max_relative = 1e-12);
        assert_eq!(year.nwc_change, 0.0);
        assert_relative_eq!(year.fcf, 1_097.25, max_relative = 1e-12);
        assert_relative_eq!(year.discount_factor, 1.0 / 1.09, max_relative = 1e-12);
        assert_relative_eq!(year.present_value, 1_006.651376146789, max_relative = 1e-9);
    }

    #[test]
    fn test_golden_terminal_year_row() {
        let valuation = golden_valuation();
        let year = &valuation.years[4];

        assert_eq!(year.year, 5);
        assert_relative_eq!(year.revenue, 12_762.815625, max_relative = 1e-9);
        assert_relative_eq!(year.nopat, 1_435.8167578125, max_relative = 1e-9);
        assert_relative_eq!(year.d_and_a, 510.512625, max_relative = 1e-9);
        // Terminal-year capex equals D&A, so FCF collapses to NOPAT.
        assert_relative_eq!(year.capex, year.d_and_a, max_relative = 1e-12);
        assert_relative_eq!(year.fcf, year.nopat, max_relative = 1e-12);
    }

    #[test]
    fn test_golden_present_values() {
        let valuation = golden_valuation();

        assert_relative_eq!(valuation.pv_explicit, 4_849.4934200524, max_relative = 1e-9);
        assert_relative_eq!(
            valuation.terminal_value,
            22_641.725796274,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            valuation.pv_terminal,
            14_715.5682349594,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            valuation.enterprise_value,
            19_565.0616550118,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_golden_enterprise_is_sum_of_parts() {
        let valuation = golden_valuation();
        assert_relative_eq!(
            valuation.enterprise_value,
            valuation.pv_explicit + valuation.pv_terminal,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_equity_bridge_with_net_debt_and_shares() {
        let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
            .revenue(10_000.0)
            .d_and_a(400.0)
            .capex(500.0)
            .net_working_capital(0.0)
            .tax_rate(0.25)
            .total_debt(2_000.0)
            .cash(500.0)
            .shares_outstanding(1_000.0)
            .build()
            .unwrap();
        let assumptions = resolver().resolve(&snapshot, &golden_inputs()).unwrap();
        let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();

        assert_relative_eq!(
            valuation.equity_value,
            valuation.enterprise_value - 1_500.0,
            max_relative = 1e-12
        );
        let price = valuation.implied_share_price.unwrap();
        assert_relative_eq!(price, valuation.equity_value / 1_000.0, max_relative = 1e-12);
        assert_relative_eq!(price, 18.0650616550118, max_relative = 1e-9);
    }

    #[test]
    fn test_equity_equals_enterprise_without_debt_or_cash() {
        let valuation = golden_valuation();
        assert_eq!(valuation.equity_value, valuation.enterprise_value);
    }

    // ================================================================
    // Share price availability
    // ================================================================

    #[test]
    fn test_no_share_price_without_share_count() {
        let valuation = golden_valuation();
        assert!(valuation.implied_share_price.is_none());
    }

    #[test]
    fn test_no_share_price_with_zero_share_count() {
        let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
            .revenue(10_000.0)
            .tax_rate(0.25)
            .shares_outstanding(0.0)
            .build()
            .unwrap();
        let assumptions = resolver().resolve(&snapshot, &golden_inputs()).unwrap();
        let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();
        assert!(valuation.implied_share_price.is_none());
    }

    // ================================================================
    // Failure modes
    // ================================================================

    #[test]
    fn test_loss_making_terminal_year_fails() {
        let inputs = golden_inputs().with_ebit_margin(vec![-0.2; 5]);
        let snapshot = golden_snapshot();
        let assumptions = resolver().resolve(&snapshot, &inputs).unwrap();
        let err = DcfEngine::new(&snapshot, &assumptions).value().unwrap_err();

        assert!(err.is_computation());
        assert!(err.to_string().contains("terminal-year free cash flow"));
    }

    #[test]
    fn test_degenerate_discount_rate_is_caught() {
        // Bypasses the resolver to hit the engine's own guard.
        let snapshot = golden_snapshot();
        let assumptions = Assumptions {
            wacc: 0.02,
            terminal_growth: 0.03,
            revenue_growth: vec![0.05],
            ebit_margin: vec![0.15],
            capex_pct: vec![0.04],
            d_and_a_pct: 0.04,
            nwc_pct: 0.0,
            tax_rate: 0.25,
        };
        let err = DcfEngine::new(&snapshot, &assumptions).value().unwrap_err();
        assert!(err.is_computation());
    }

    #[test]
    fn test_zero_horizon_is_caught() {
        let snapshot = golden_snapshot();
        let assumptions = Assumptions {
            wacc: 0.09,
            terminal_growth: 0.02,
            revenue_growth: vec![],
            ebit_margin: vec![],
            capex_pct: vec![],
            d_and_a_pct: 0.04,
            nwc_pct: 0.0,
            tax_rate: 0.25,
        };
        let err = DcfEngine::new(&snapshot, &assumptions).value().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_mismatched_schedule_lengths_are_caught() {
        // Three growth years but only two margin and capex entries;
        // indexing past the shorter schedules must not panic.
        let snapshot = golden_snapshot();
        let assumptions = Assumptions {
            wacc: 0.09,
            terminal_growth: 0.02,
            revenue_growth: vec![0.05, 0.05, 0.05],
            ebit_margin: vec![0.15, 0.15],
            capex_pct: vec![0.04, 0.04],
            d_and_a_pct: 0.04,
            nwc_pct: 0.0,
            tax_rate: 0.25,
        };
        let err = DcfEngine::new(&snapshot, &assumptions).value().unwrap_err();
        assert!(err.is_configuration());
    }

    // ================================================================
    // Projection behaviour
    // ================================================================

    #[test]
    fn test_zero_growth_keeps_revenue_flat() {
        let snapshot = golden_snapshot();
        let inputs = golden_inputs().with_revenue_growth(vec![0.0; 5]);
        let assumptions = resolver().resolve(&snapshot, &inputs).unwrap();
        let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();

        for year in &valuation.years {
            assert_relative_eq!(year.revenue, 10_000.0, max_relative = 1e-12);
            assert_eq!(year.nwc_change, 0.0);
        }
    }

    #[test]
    fn test_negative_nwc_share_raises_cash_flow() {
        let snapshot = golden_snapshot();
        let neutral = resolver()
            .resolve(&snapshot, &golden_inputs().with_nwc_pct(0.0))
            .unwrap();
        let supplier_funded = resolver()
            .resolve(&snapshot, &golden_inputs().with_nwc_pct(-0.05))
            .unwrap();

        let base = DcfEngine::new(&snapshot, &neutral).value().unwrap();
        let funded = DcfEngine::new(&snapshot, &supplier_funded).value().unwrap();

        // Growth releases cash when working capital runs negative.
        assert!(funded.years[0].fcf > base.years[0].fcf);
        assert!(funded.enterprise_value > base.enterprise_value);
    }

    #[test]
    fn test_higher_discount_rate_lowers_value() {
        let snapshot = golden_snapshot();
        let cheap = resolver()
            .resolve(&snapshot, &golden_inputs().with_wacc(0.09))
            .unwrap();
        let dear = resolver()
            .resolve(&snapshot, &golden_inputs().with_wacc(0.12))
            .unwrap();

        let low = DcfEngine::new(&snapshot, &dear).value().unwrap();
        let high = DcfEngine::new(&snapshot, &cheap).value().unwrap();
        assert!(low.enterprise_value < high.enterprise_value);
    }

    #[test]
    fn test_single_year_horizon() {
        let snapshot = golden_snapshot();
        let inputs = golden_inputs()
            .with_revenue_growth(vec![0.05])
            .with_ebit_margin(vec![0.15]);
        let assumptions = resolver().resolve(&snapshot, &inputs).unwrap();
        let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();

        assert_eq!(valuation.horizon(), 1);
        // Single-year taper starts at steady state already.
        assert_relative_eq!(
            valuation.years[0].capex,
            valuation.years[0].d_and_a,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_discount_factors_strictly_decrease() {
        let valuation = golden_valuation();
        for pair in valuation.years.windows(2) {
            assert!(pair[1].discount_factor < pair[0].discount_factor);
        }
    }

    // ================================================================
    // Property-based tests
    // ================================================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn schedule_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
            (1usize..12).prop_flat_map(|n| {
                (
                    prop::collection::vec(-0.2..0.3_f64, n),
                    prop::collection::vec(0.05..0.4_f64, n),
                )
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn prop_enterprise_is_sum_of_explicit_and_terminal(
                (growth, margins) in schedule_strategy(),
                wacc in 0.06..0.15_f64,
                terminal_growth in 0.0..0.03_f64,
                nwc_pct in -0.1..0.2_f64,
                tax_rate in 0.0..0.5_f64,
            ) {
                let snapshot = FundamentalsSnapshot::builder("PROP", Currency::USD)
                    .revenue(5_000.0)
                    .build()
                    .unwrap();
                let inputs = AssumptionInputs::new()
                    .with_wacc(wacc)
                    .with_terminal_growth(terminal_growth)
                    .with_revenue_growth(growth)
                    .with_ebit_margin(margins)
                    .with_nwc_pct(nwc_pct)
                    .with_tax_rate(tax_rate);
                let assumptions = AssumptionResolver::new(FallbackPolicy::default())
                    .resolve(&snapshot, &inputs)
                    .unwrap();

                match DcfEngine::new(&snapshot, &assumptions).value() {
                    Ok(valuation) => {
                        prop_assert!(valuation.pv_terminal > 0.0);
                        prop_assert!(
                            (valuation.enterprise_value
                                - (valuation.pv_explicit + valuation.pv_terminal))
                                .abs()
                                < 1e-9 * valuation.enterprise_value.abs().max(1.0)
                        );
                        for year in &valuation.years {
                            prop_assert!(year.revenue > 0.0);
                        }
                        for pair in valuation.years.windows(2) {
                            prop_assert!(pair[1].discount_factor < pair[0].discount_factor);
                        }
                        let last = valuation.years.last().unwrap();
                        prop_assert!((last.capex - last.d_and_a).abs() < 1e-9);
                    }
                    Err(err) => prop_assert!(err.is_computation()),
                }
            }

            #[test]
            fn prop_equity_is_enterprise_less_net_debt(
                debt in 0.0..5_000.0_f64,
                cash in 0.0..5_000.0_f64,
            ) {
                let snapshot = FundamentalsSnapshot::builder("PROP", Currency::USD)
                    .revenue(10_000.0)
                    .tax_rate(0.25)
                    .total_debt(debt)
                    .cash(cash)
                    .build()
                    .unwrap();
                let inputs = AssumptionInputs::new()
                    .with_wacc(0.09)
                    .with_terminal_growth(0.02)
                    .with_revenue_growth(vec![0.05; 5])
                    .with_ebit_margin(vec![0.15; 5]);
                let assumptions = AssumptionResolver::new(FallbackPolicy::default())
                    .resolve(&snapshot, &inputs)
                    .unwrap();
                let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();

                prop_assert!(
                    (valuation.equity_value - (valuation.enterprise_value - (debt - cash))).abs()
                        < 1e-9 * valuation.enterprise_value.abs().max(1.0)
                );
            }
        }
    }
}
