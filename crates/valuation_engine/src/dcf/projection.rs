//! Projection records produced by the DCF engine.

/// One projected year of the explicit horizon.
///
/// All monetary amounts are in the snapshot's currency. `year` is
/// one-based: year 1 is the first projected year after the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectedYear {
    /// Projection year, starting at 1.
    pub year: usize,
    /// Projected revenue.
    pub revenue: f64,
    /// Earnings before interest and tax.
    pub ebit: f64,
    /// Net operating profit after tax.
    pub nopat: f64,
    /// Depreciation and amortisation added back.
    pub d_and_a: f64,
    /// Capital expenditure.
    pub capex: f64,
    /// Change in net working capital versus the prior year.
    pub nwc_change: f64,
    /// Unlevered free cash flow.
    pub fcf: f64,
    /// Discount factor applied to this year's cash flow.
    pub discount_factor: f64,
    /// Present value of this year's cash flow.
    pub present_value: f64,
}

/// Complete DCF valuation result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DcfResult {
    /// Year-by-year projection rows.
    pub years: Vec<ProjectedYear>,
    /// Present value of the explicit-horizon cash flows.
    pub pv_explicit: f64,
    /// Present value of the terminal value.
    pub pv_terminal: f64,
    /// Undiscounted Gordon growth terminal value.
    pub terminal_value: f64,
    /// Enterprise value: explicit PV plus terminal PV.
    pub enterprise_value: f64,
    /// Equity value: enterprise value less net debt.
    pub equity_value: f64,
    /// Equity value per share, when the snapshot carries a positive
    /// share count.
    pub implied_share_price: Option<f64>,
}

impl DcfResult {
    /// Number of explicitly projected years.
    pub fn horizon(&self) -> usize {
        self.years.len()
    }
}
