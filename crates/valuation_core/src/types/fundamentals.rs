//! Company fundamentals snapshot.
//!
//! This module provides the immutable record of a company's trailing
//! financials consumed by every valuation engine, plus the builder used
//! to construct and validate it.
//!
//! The snapshot is produced once per run by an external data collaborator
//! and is read-only afterwards. Revenue is the projection base and must be
//! present and positive; every other financial field is optional and
//! explicitly marked absent when the upstream source had no figure.
//!
//! # Examples
//!
//! ```
//! use valuation_core::types::{Currency, FundamentalsSnapshot};
//!
//! let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
//!     .revenue(10_000.0)
//!     .ebit(1_500.0)
//!     .d_and_a(400.0)
//!     .total_debt(2_000.0)
//!     .cash(500.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(snapshot.net_debt(), 1_500.0);
//! assert_eq!(snapshot.ebitda(), Some(1_900.0)); // EBIT + D&A fallback
//! ```

use super::currency::Currency;
use super::error::SnapshotError;
use super::multiple::MultipleKind;

/// Immutable record of a company's trailing financials.
///
/// All monetary fields share the snapshot currency and the same unit
/// scale; no implicit conversion is performed anywhere downstream.
/// Constructed via [`FundamentalsSnapshot::builder`], which enforces the
/// revenue invariant.
///
/// # Examples
///
/// ```
/// use valuation_core::types::{Currency, FundamentalsSnapshot, MultipleKind};
///
/// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
///     .revenue(10_000.0)
///     .ebit(1_500.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(snapshot.metric_value(MultipleKind::EvToRevenue), Some(10_000.0));
/// assert_eq!(snapshot.metric_value(MultipleKind::EvToEbitda), None);
/// ```
///
/// Serialisation is one-way: snapshots can be written out under the
/// `serde` feature but only the builder can construct one, keeping the
/// revenue invariant enforced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FundamentalsSnapshot {
    /// Ticker symbol of the subject company.
    ticker: String,
    /// Reporting currency of every monetary field.
    currency: Currency,
    /// Trailing twelve-month revenue. Always positive.
    revenue: f64,
    /// Trailing operating income.
    ebit: Option<f64>,
    /// Trailing EBITDA as reported.
    ebitda: Option<f64>,
    /// Trailing depreciation and amortisation.
    d_and_a: Option<f64>,
    /// Trailing capital expenditure.
    capex: Option<f64>,
    /// Operating net working capital level.
    net_working_capital: Option<f64>,
    /// Effective cash tax rate as a fraction.
    tax_rate: Option<f64>,
    /// Diluted shares outstanding.
    shares_outstanding: Option<f64>,
    /// Total interest-bearing debt.
    total_debt: Option<f64>,
    /// Cash and cash equivalents.
    cash: Option<f64>,
    /// Spot share price at snapshot time.
    share_price: Option<f64>,
}

impl FundamentalsSnapshot {
    /// Start building a snapshot for the given ticker and currency.
    pub fn builder(ticker: impl Into<String>, currency: Currency) -> FundamentalsBuilder {
        FundamentalsBuilder::new(ticker, currency)
    }

    /// Returns the ticker symbol.
    #[inline]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the reporting currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns trailing revenue. Always positive.
    #[inline]
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Returns trailing EBIT, if reported.
    #[inline]
    pub fn ebit(&self) -> Option<f64> {
        self.ebit
    }

    /// Returns trailing D&A, if reported.
    #[inline]
    pub fn d_and_a(&self) -> Option<f64> {
        self.d_and_a
    }

    /// Returns trailing capital expenditure, if reported.
    #[inline]
    pub fn capex(&self) -> Option<f64> {
        self.capex
    }

    /// Returns the operating net working capital level, if reported.
    ///
    /// Negative levels are legitimate (payables-funded working capital
    /// cycles) and are passed through unmodified.
    #[inline]
    pub fn net_working_capital(&self) -> Option<f64> {
        self.net_working_capital
    }

    /// Returns the effective cash tax rate, if reported.
    #[inline]
    pub fn tax_rate(&self) -> Option<f64> {
        self.tax_rate
    }

    /// Returns diluted shares outstanding, if reported.
    #[inline]
    pub fn shares_outstanding(&self) -> Option<f64> {
        self.shares_outstanding
    }

    /// Returns total interest-bearing debt, if reported.
    #[inline]
    pub fn total_debt(&self) -> Option<f64> {
        self.total_debt
    }

    /// Returns cash and equivalents, if reported.
    #[inline]
    pub fn cash(&self) -> Option<f64> {
        self.cash
    }

    /// Returns the spot share price at snapshot time, if available.
    #[inline]
    pub fn share_price(&self) -> Option<f64> {
        self.share_price
    }

    /// Returns net debt: total debt minus cash, absent fields as zero.
    ///
    /// The bridge from enterprise value to equity value subtracts this
    /// figure.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuation_core::types::{Currency, FundamentalsSnapshot};
    ///
    /// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
    ///     .revenue(100.0)
    ///     .cash(30.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(snapshot.net_debt(), -30.0);
    /// ```
    pub fn net_debt(&self) -> f64 {
        self.total_debt.unwrap_or(0.0) - self.cash.unwrap_or(0.0)
    }

    /// Returns trailing EBITDA.
    ///
    /// Uses the reported figure when present, otherwise falls back to
    /// EBIT + D&A when both are present.
    pub fn ebitda(&self) -> Option<f64> {
        self.ebitda.or(match (self.ebit, self.d_and_a) {
            (Some(ebit), Some(d_and_a)) => Some(ebit + d_and_a),
            _ => None,
        })
    }

    /// Returns the subject company's own value of a multiple's base metric.
    ///
    /// This is the figure a peer multiple is applied to when implying the
    /// subject's enterprise value.
    pub fn metric_value(&self, kind: MultipleKind) -> Option<f64> {
        match kind {
            MultipleKind::EvToRevenue => Some(self.revenue),
            MultipleKind::EvToEbit => self.ebit,
            MultipleKind::EvToEbitda => self.ebitda(),
        }
    }

    /// Returns trailing EBIT margin (EBIT over revenue), if EBIT is reported.
    pub fn ebit_margin(&self) -> Option<f64> {
        self.ebit.map(|ebit| ebit / self.revenue)
    }

    /// Returns D&A as a share of revenue, if D&A is reported.
    pub fn d_and_a_pct_of_revenue(&self) -> Option<f64> {
        self.d_and_a.map(|d| d / self.revenue)
    }

    /// Returns CapEx as a share of revenue, if CapEx is reported.
    pub fn capex_pct_of_revenue(&self) -> Option<f64> {
        self.capex.map(|c| c / self.revenue)
    }

    /// Returns net working capital as a share of revenue, if reported.
    ///
    /// Sign is preserved; negative working-capital cycles stay negative.
    pub fn nwc_pct_of_revenue(&self) -> Option<f64> {
        self.net_working_capital.map(|nwc| nwc / self.revenue)
    }
}

/// Builder for constructing validated fundamentals snapshots.
///
/// # Examples
///
/// ```
/// use valuation_core::types::{Currency, FundamentalsSnapshot};
///
/// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::EUR)
///     .revenue(5_400.0)
///     .ebit(610.0)
///     .shares_outstanding(120.0)
///     .build()
///     .unwrap();
/// assert_eq!(snapshot.ticker(), "ACME");
/// ```
#[derive(Debug, Clone)]
pub struct FundamentalsBuilder {
    ticker: String,
    currency: Currency,
    revenue: Option<f64>,
    ebit: Option<f64>,
    ebitda: Option<f64>,
    d_and_a: Option<f64>,
    capex: Option<f64>,
    net_working_capital: Option<f64>,
    tax_rate: Option<f64>,
    shares_outstanding: Option<f64>,
    total_debt: Option<f64>,
    cash: Option<f64>,
    share_price: Option<f64>,
}

impl FundamentalsBuilder {
    /// Creates a new builder for the given ticker and currency.
    pub fn new(ticker: impl Into<String>, currency: Currency) -> Self {
        Self {
            ticker: ticker.into(),
            currency,
            revenue: None,
            ebit: None,
            ebitda: None,
            d_and_a: None,
            capex: None,
            net_working_capital: None,
            tax_rate: None,
            shares_outstanding: None,
            total_debt: None,
            cash: None,
            share_price: None,
        }
    }

    /// Sets trailing revenue.
    pub fn revenue(mut self, value: f64) -> Self {
        self.revenue = Some(value);
        self
    }

    /// Sets trailing EBIT.
    pub fn ebit(mut self, value: f64) -> Self {
        self.ebit = Some(value);
        self
    }

    /// Sets trailing EBITDA as reported.
    pub fn ebitda(mut self, value: f64) -> Self {
        self.ebitda = Some(value);
        self
    }

    /// Sets trailing depreciation and amortisation.
    pub fn d_and_a(mut self, value: f64) -> Self {
        self.d_and_a = Some(value);
        self
    }

    /// Sets trailing capital expenditure.
    pub fn capex(mut self, value: f64) -> Self {
        self.capex = Some(value);
        self
    }

    /// Sets the operating net working capital level.
    pub fn net_working_capital(mut self, value: f64) -> Self {
        self.net_working_capital = Some(value);
        self
    }

    /// Sets the effective cash tax rate.
    pub fn tax_rate(mut self, value: f64) -> Self {
        self.tax_rate = Some(value);
        self
    }

    /// Sets diluted shares outstanding.
    pub fn shares_outstanding(mut self, value: f64) -> Self {
        self.shares_outstanding = Some(value);
        self
    }

    /// Sets total interest-bearing debt.
    pub fn total_debt(mut self, value: f64) -> Self {
        self.total_debt = Some(value);
        self
    }

    /// Sets cash and cash equivalents.
    pub fn cash(mut self, value: f64) -> Self {
        self.cash = Some(value);
        self
    }

    /// Sets the spot share price.
    pub fn share_price(mut self, value: f64) -> Self {
        self.share_price = Some(value);
        self
    }

    /// Builds the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ticker is empty
    /// - Revenue was never set
    /// - Revenue is zero, negative, or not finite
    pub fn build(self) -> Result<FundamentalsSnapshot, SnapshotError> {
        if self.ticker.trim().is_empty() {
            return Err(SnapshotError::EmptyTicker);
        }

        let revenue = self.revenue.ok_or(SnapshotError::MissingRevenue {
            ticker: self.ticker.clone(),
        })?;

        if !(revenue.is_finite() && revenue > 0.0) {
            return Err(SnapshotError::NonPositiveRevenue {
                ticker: self.ticker,
                revenue,
            });
        }

        Ok(FundamentalsSnapshot {
            ticker: self.ticker,
            currency: self.currency,
            revenue,
            ebit: self.ebit,
            ebitda: self.ebitda,
            d_and_a: self.d_and_a,
            capex: self.capex,
            net_working_capital: self.net_working_capital,
            tax_rate: self.tax_rate,
            shares_outstanding: self.shares_outstanding,
            total_debt: self.total_debt,
            cash: self.cash,
            share_price: self.share_price,
        })
    }
}
