//! Valuation request parsing
//!
//! A request file is a JSON document carrying the subject company's
//! fundamentals, optional assumption overrides and an optional list of
//! multiples to aggregate. Peer multiples arrive separately as CSV rows
//! of `ticker,metric,value`.

use serde::Deserialize;
use std::path::Path;

use valuation_core::types::{Currency, FundamentalsSnapshot, MultipleKind, PeerMultiple};
use valuation_engine::AssumptionInputs;

use crate::error::{CliError, Result};

/// On-disk form of a fundamentals snapshot.
///
/// Mirrors the builder of [`FundamentalsSnapshot`]: ticker, currency and
/// revenue are required, every other line item is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDocument {
    /// Ticker symbol identifying the subject company.
    pub ticker: String,
    /// ISO code of the reporting currency.
    pub currency: String,
    /// Trailing twelve-month revenue.
    pub revenue: f64,
    /// Trailing EBIT.
    #[serde(default)]
    pub ebit: Option<f64>,
    /// Trailing EBITDA.
    #[serde(default)]
    pub ebitda: Option<f64>,
    /// Trailing depreciation and amortisation.
    #[serde(default)]
    pub d_and_a: Option<f64>,
    /// Trailing capital expenditure.
    #[serde(default)]
    pub capex: Option<f64>,
    /// Net working capital level.
    #[serde(default)]
    pub net_working_capital: Option<f64>,
    /// Effective tax rate observed in the accounts.
    #[serde(default)]
    pub tax_rate: Option<f64>,
    /// Diluted shares outstanding.
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
    /// Total interest-bearing debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash: Option<f64>,
    /// Current share price, used only for reporting alongside the result.
    #[serde(default)]
    pub share_price: Option<f64>,
}

impl SnapshotDocument {
    /// Validate the document and build the core snapshot type.
    pub fn to_snapshot(&self) -> Result<FundamentalsSnapshot> {
        let currency: Currency = self.currency.parse()?;
        let mut builder =
            FundamentalsSnapshot::builder(self.ticker.as_str(), currency).revenue(self.revenue);
        if let Some(v) = self.ebit {
            builder = builder.ebit(v);
        }
        if let Some(v) = self.ebitda {
            builder = builder.ebitda(v);
        }
        if let Some(v) = self.d_and_a {
            builder = builder.d_and_a(v);
        }
        if let Some(v) = self.capex {
            builder = builder.capex(v);
        }
        if let Some(v) = self.net_working_capital {
            builder = builder.net_working_capital(v);
        }
        if let Some(v) = self.tax_rate {
            builder = builder.tax_rate(v);
        }
        if let Some(v) = self.shares_outstanding {
            builder = builder.shares_outstanding(v);
        }
        if let Some(v) = self.total_debt {
            builder = builder.total_debt(v);
        }
        if let Some(v) = self.cash {
            builder = builder.cash(v);
        }
        if let Some(v) = self.share_price {
            builder = builder.share_price(v);
        }
        Ok(builder.build()?)
    }
}

/// One peer multiple carried inline in the request document.
#[derive(Debug, Clone, Deserialize)]
pub struct PeerDocument {
    /// Peer company ticker.
    pub ticker: String,
    /// Metric label, e.g. `EV/EBITDA`.
    pub metric: String,
    /// Observed multiple value.
    pub value: f64,
}

impl PeerDocument {
    /// Parse into the core peer record.
    pub fn to_peer(&self) -> Result<PeerMultiple> {
        let kind: MultipleKind = self.metric.trim().parse()?;
        Ok(PeerMultiple::new(self.ticker.as_str(), kind, self.value))
    }
}

/// A complete valuation request loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationRequest {
    /// Subject company fundamentals.
    pub snapshot: SnapshotDocument,
    /// Assumption overrides; omitted fields resolve from the snapshot.
    #[serde(default)]
    pub assumptions: AssumptionInputs,
    /// Multiples to aggregate; empty means follow peer coverage.
    #[serde(default)]
    pub metrics: Vec<String>,
    /// Peer multiples embedded in the request document.
    #[serde(default)]
    pub peers: Vec<PeerDocument>,
}

impl ValuationRequest {
    /// Load a request from a JSON file.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(CliError::FileNotFound(path.to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse the peers embedded in the request document.
    pub fn embedded_peers(&self) -> Result<Vec<PeerMultiple>> {
        self.peers.iter().map(PeerDocument::to_peer).collect()
    }
}

/// Gather peers from the request document plus an optional CSV file.
///
/// Document peers come first so first-appearance metric ordering is
/// stable across the two sources.
pub fn collect_peers(
    request: &ValuationRequest,
    peers_path: Option<&str>,
) -> Result<Vec<PeerMultiple>> {
    let mut peers = request.embedded_peers()?;
    if let Some(path) = peers_path {
        peers.extend(load_peers(path)?);
    }
    Ok(peers)
}

/// Parse metric labels into multiple kinds, trimming whitespace.
pub fn parse_metrics(labels: &[String]) -> Result<Vec<MultipleKind>> {
    labels
        .iter()
        .map(|label| {
            label
                .trim()
                .parse::<MultipleKind>()
                .map_err(CliError::from)
        })
        .collect()
}

/// One row of a peer multiples CSV file.
#[derive(Debug, Deserialize)]
struct PeerRow {
    ticker: String,
    metric: String,
    value: f64,
}

/// Load peer multiples from a CSV file with `ticker,metric,value` columns.
pub fn load_peers(path: &str) -> Result<Vec<PeerMultiple>> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut peers = Vec::new();
    for row in reader.deserialize() {
        let row: PeerRow = row?;
        let kind: MultipleKind = row.metric.trim().parse()?;
        peers.push(PeerMultiple::new(row.ticker, kind, row.value));
    }
    Ok(peers)
}

/// Fill gaps in caller assumptions with snapshot-inferred values.
///
/// Caller-provided fields always win. Inferred schedules are stretched
/// to the caller's growth horizon when one was given, otherwise to
/// `default_horizon`. Reinvestment ratios are left untouched; the
/// resolver already derives those from the snapshot with policy
/// fallbacks.
pub fn overlay_inferred(
    assumptions: AssumptionInputs,
    snapshot: &FundamentalsSnapshot,
    default_horizon: usize,
) -> AssumptionInputs {
    let inferred = AssumptionInputs::infer_from_snapshot(snapshot);
    let horizon = assumptions
        .revenue_growth
        .as_ref()
        .map(Vec::len)
        .filter(|&n| n > 0)
        .unwrap_or(default_horizon);
    AssumptionInputs {
        wacc: assumptions.wacc.or(inferred.wacc),
        terminal_growth: assumptions.terminal_growth.or(inferred.terminal_growth),
        revenue_growth: assumptions
            .revenue_growth
            .or_else(|| inferred.revenue_growth.map(|s| constant_schedule(s, horizon))),
        ebit_margin: assumptions
            .ebit_margin
            .or_else(|| inferred.ebit_margin.map(|s| constant_schedule(s, horizon))),
        tax_rate: assumptions.tax_rate.or(inferred.tax_rate),
        nwc_pct: assumptions.nwc_pct,
        d_and_a_pct: assumptions.d_and_a_pct,
        capex_pct: assumptions.capex_pct,
        capex_schedule: assumptions.capex_schedule,
    }
}

/// Restate a constant schedule at a new horizon.
fn constant_schedule(schedule: Vec<f64>, horizon: usize) -> Vec<f64> {
    match schedule.first().copied() {
        Some(value) => vec![value; horizon],
        None => schedule,
    }
}
