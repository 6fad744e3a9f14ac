//! Resolution of partial inputs into a concrete assumption set.
//!
//! The resolver applies one rule everywhere: caller-supplied values win,
//! snapshot-derived ratios come second, policy defaults fill what is
//! left. Required fields with no sensible default (discount rate,
//! terminal growth, the growth and margin schedules, the tax rate) fail
//! resolution instead of being guessed.

use tracing::debug;
use valuation_core::types::{FundamentalsSnapshot, ValuationError};

use super::inputs::AssumptionInputs;
use super::policy::FallbackPolicy;

/// Fully resolved assumption set consumed by the engines.
///
/// Produced by [`AssumptionResolver::resolve`]. Every field holds a
/// concrete finite number, both schedules share the same length, and
/// the final capital expenditure share equals `d_and_a_pct` so the
/// terminal year is at reinvestment steady state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assumptions {
    /// Weighted average cost of capital.
    pub wacc: f64,
    /// Perpetuity growth rate for the terminal value.
    pub terminal_growth: f64,
    /// Year-by-year revenue growth rates; the length is the horizon.
    pub revenue_growth: Vec<f64>,
    /// Year-by-year EBIT margins.
    pub ebit_margin: Vec<f64>,
    /// Year-by-year capital expenditure shares of revenue.
    pub capex_pct: Vec<f64>,
    /// Depreciation and amortisation share of revenue.
    pub d_and_a_pct: f64,
    /// Net working capital as a share of revenue. May be negative for
    /// businesses funded by their suppliers.
    pub nwc_pct: f64,
    /// Effective tax rate on EBIT.
    pub tax_rate: f64,
}

impl Assumptions {
    /// Projection horizon in years.
    pub fn horizon(&self) -> usize {
        self.revenue_growth.len()
    }
}

/// Resolves caller inputs against a snapshot and a fallback policy.
///
/// # Example
///
/// ```
/// use valuation_core::types::{Currency, FundamentalsSnapshot};
/// use valuation_engine::assumptions::{AssumptionInputs, AssumptionResolver, FallbackPolicy};
///
/// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
///     .revenue(10_000.0)
///     .d_and_a(400.0)
///     .capex(500.0)
///     .tax_rate(0.25)
///     .build()
///     .unwrap();
///
/// let inputs = AssumptionInputs::new()
///     .with_wacc(0.09)
///     .with_terminal_growth(0.025)
///     .with_revenue_growth(vec![0.05; 5])
///     .with_ebit_margin(vec![0.15; 5]);
///
/// let assumptions = AssumptionResolver::new(FallbackPolicy::default())
///     .resolve(&snapshot, &inputs)
///     .unwrap();
///
/// // Derived from the snapshot: 500 / 10 000 tapering to 400 / 10 000.
/// assert!((assumptions.capex_pct[0] - 0.048).abs() < 1e-12);
/// assert_eq!(assumptions.capex_pct[4], assumptions.d_and_a_pct);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumptionResolver {
    policy: FallbackPolicy,
}

impl AssumptionResolver {
    /// Create a resolver with the given fallback policy.
    pub fn new(policy: FallbackPolicy) -> Self {
        Self { policy }
    }

    /// The fallback policy this resolver applies.
    pub fn policy(&self) -> &FallbackPolicy {
        &self.policy
    }

    /// Resolve partial inputs into a complete assumption set.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::MissingAssumption`] when the discount rate,
    ///   terminal growth, growth schedule, margin schedule or tax rate
    ///   cannot be sourced from the inputs or the snapshot
    /// - [`ValuationError::Configuration`] for an empty growth schedule,
    ///   schedule length mismatches, a non-positive discount rate, a
    ///   discount rate not exceeding terminal growth, a tax rate outside
    ///   `[0, 1)`, or non-finite values anywhere
    pub fn resolve(
        &self,
        snapshot: &FundamentalsSnapshot,
        inputs: &AssumptionInputs,
    ) -> Result<Assumptions, ValuationError> {
        let revenue_growth = inputs
            .revenue_growth
            .clone()
            .ok_or_else(|| ValuationError::missing("revenue_growth"))?;
        if revenue_growth.is_empty() {
            return Err(ValuationError::configuration(
                "revenue growth schedule is empty; the projection horizon must be at least one year",
            ));
        }
        let horizon = revenue_growth.len();
        for (i, g) in revenue_growth.iter().enumerate() {
            if !g.is_finite() || *g <= -1.0 {
                return Err(ValuationError::configuration(format!(
                    "revenue growth for year {} is {}; must be finite and above -100%",
                    i + 1,
                    g
                )));
            }
        }

        let ebit_margin = inputs
            .ebit_margin
            .clone()
            .ok_or_else(|| ValuationError::missing("ebit_margin"))?;
        if ebit_margin.len() != horizon {
            return Err(ValuationError::configuration(format!(
                "EBIT margin schedule has {} entries but the growth schedule has {}",
                ebit_margin.len(),
                horizon
            )));
        }
        for (i, m) in ebit_margin.iter().enumerate() {
            if !m.is_finite() {
                return Err(ValuationError::configuration(format!(
                    "EBIT margin for year {} is not finite",
                    i + 1
                )));
            }
        }

        let wacc = inputs.wacc.ok_or_else(|| ValuationError::missing("wacc"))?;
        if !wacc.is_finite() || wacc <= 0.0 {
            return Err(ValuationError::configuration(format!(
                "discount rate must be positive and finite, got {wacc}"
            )));
        }

        let terminal_growth = inputs
            .terminal_growth
            .ok_or_else(|| ValuationError::missing("terminal_growth"))?;
        if !terminal_growth.is_finite() {
            return Err(ValuationError::configuration(
                "terminal growth rate is not finite",
            ));
        }
        if wacc <= terminal_growth {
            return Err(ValuationError::configuration(format!(
                "discount rate ({wacc}) must exceed terminal growth ({terminal_growth})"
            )));
        }

        let tax_rate = inputs
            .tax_rate
            .or(snapshot.tax_rate())
            .ok_or_else(|| ValuationError::missing("tax_rate"))?;
        if !tax_rate.is_finite() || !(0.0..1.0).contains(&tax_rate) {
            return Err(ValuationError::configuration(format!(
                "tax rate {tax_rate} is outside [0, 1)"
            )));
        }

        let nwc_pct = Self::resolve_ratio(
            "working capital",
            inputs.nwc_pct,
            snapshot.nwc_pct_of_revenue(),
            self.policy.nwc_pct,
        )?;
        let d_and_a_pct = Self::resolve_ratio(
            "depreciation and amortisation",
            inputs.d_and_a_pct,
            snapshot.d_and_a_pct_of_revenue(),
            self.policy.d_and_a_pct,
        )?;

        let mut capex_pct = match &inputs.capex_schedule {
            Some(schedule) => {
                if schedule.len() != horizon {
                    return Err(ValuationError::configuration(format!(
                        "capital expenditure schedule has {} entries but the growth schedule has {}",
                        schedule.len(),
                        horizon
                    )));
                }
                for (i, c) in schedule.iter().enumerate() {
                    if !c.is_finite() {
                        return Err(ValuationError::configuration(format!(
                            "capital expenditure share for year {} is not finite",
                            i + 1
                        )));
                    }
                }
                schedule.clone()
            }
            None => {
                let start = Self::resolve_ratio(
                    "capital expenditure",
                    inputs.capex_pct,
                    snapshot.capex_pct_of_revenue(),
                    self.policy.capex_pct,
                )?;
                Self::taper_schedule(start, d_and_a_pct, horizon)
            }
        };

        // Terminal-year reinvestment is held equal to D&A.
        let last = horizon - 1;
        if (capex_pct[last] - d_and_a_pct).abs() > f64::EPSILON {
            debug!(
                from = capex_pct[last],
                to = d_and_a_pct,
                "pinning terminal-year capex share to the D&A share"
            );
        }
        capex_pct[last] = d_and_a_pct;

        Ok(Assumptions {
            wacc,
            terminal_growth,
            revenue_growth,
            ebit_margin,
            capex_pct,
            d_and_a_pct,
            nwc_pct,
            tax_rate,
        })
    }

    /// Resolve one revenue ratio: caller wins, snapshot second, policy
    /// default last. The sign of derived ratios is preserved.
    fn resolve_ratio(
        label: &str,
        caller: Option<f64>,
        derived: Option<f64>,
        fallback: f64,
    ) -> Result<f64, ValuationError> {
        let value = match caller.or(derived) {
            Some(v) => v,
            None => {
                debug!(ratio = label, fallback, "applying policy default");
                fallback
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValuationError::configuration(format!(
                "{label} share of revenue is not finite"
            )))
        }
    }

    /// Linear taper from `start` in year one towards `terminal` in the
    /// final year.
    fn taper_schedule(start: f64, terminal: f64, horizon: usize) -> Vec<f64> {
        let n = horizon as f64;
        (1..=horizon)
            .map(|t| start - (start - terminal) * (t as f64 / n))
            .collect()
    }
}
