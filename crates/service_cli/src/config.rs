//! CLI configuration loading
//!
//! Reads an optional TOML file (default `fairval.toml`) that carries
//! fallback reinvestment ratios and defaults for omitted flags. A
//! missing file is not an error; built-in defaults apply.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use valuation_engine::{AssumptionInputs, FallbackPolicy};

use crate::error::Result;

/// Fallback ratio overrides for the assumption resolver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Net working capital as a fraction of incremental revenue.
    pub nwc_pct: f64,
    /// Starting capital expenditure as a fraction of revenue.
    pub capex_pct: f64,
    /// Depreciation and amortisation as a fraction of revenue.
    pub d_and_a_pct: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let policy = FallbackPolicy::default();
        Self {
            nwc_pct: policy.nwc_pct,
            capex_pct: policy.capex_pct,
            d_and_a_pct: policy.d_and_a_pct,
        }
    }
}

impl From<&PolicyConfig> for FallbackPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            nwc_pct: config.nwc_pct,
            capex_pct: config.capex_pct,
            d_and_a_pct: config.d_and_a_pct,
        }
    }
}

/// Defaults applied when command-line flags are omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Multiples to aggregate when neither the flag nor the request names any.
    pub metrics: Vec<String>,
    /// Output format for the `value` command.
    pub format: String,
    /// Projection horizon in years for inferred assumption schedules.
    pub horizon: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            metrics: Vec::new(),
            format: "table".to_string(),
            horizon: AssumptionInputs::INFERRED_HORIZON_YEARS,
        }
    }
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Fallback ratios used when a request omits reinvestment assumptions.
    pub policy: PolicyConfig,
    /// Defaults for omitted command-line flags.
    pub defaults: DefaultsConfig,
}

impl CliConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the built-in defaults; a present but
    /// malformed file is an error.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            debug!(path, "no configuration file; using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Fallback policy assembled from the configured ratios.
    pub fn fallback_policy(&self) -> FallbackPolicy {
        FallbackPolicy::from(&self.policy)
    }
}
