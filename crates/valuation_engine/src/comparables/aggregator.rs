//! Peer multiple aggregation against a subject snapshot.

use std::fmt;

use valuation_core::math::{median, Quartiles};
use valuation_core::types::{FundamentalsSnapshot, MultipleKind, PeerMultiple, ValuationError};

/// Why a requested metric was skipped rather than valued.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// The snapshot does not carry the base metric.
    MissingBase,
    /// The base metric is present but not positive, so applying a
    /// multiple to it would flip the sign of the estimate.
    NonPositiveBase {
        /// The offending base value.
        value: f64,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingBase => write!(f, "base metric missing from snapshot"),
            SkipReason::NonPositiveBase { value } => {
                write!(f, "base metric is not positive ({value})")
            }
        }
    }
}

/// A metric that was requested but could not be valued.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedMetric {
    /// The requested multiple.
    pub metric: MultipleKind,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Valuation implied by one multiple across the peer group.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedValuation {
    /// The multiple this estimate is built on.
    pub metric: MultipleKind,
    /// Number of usable peer observations.
    pub peer_count: usize,
    /// Quartile band of the peer multiples.
    pub multiple: Quartiles,
    /// The subject's base metric value.
    pub base_value: f64,
    /// Implied enterprise value band.
    pub enterprise_value: Quartiles,
    /// Implied equity value band, enterprise less net debt.
    pub equity_value: Quartiles,
    /// Implied per-share band, when the snapshot carries a positive
    /// share count.
    pub share_price: Option<Quartiles>,
}

/// Result of aggregating peer multiples against a subject snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparablesResult {
    /// One estimate per valued metric, in request order.
    pub implied: Vec<ImpliedValuation>,
    /// Metrics requested but skipped, with reasons.
    pub skipped: Vec<SkippedMetric>,
    /// Median of the per-metric median enterprise values.
    pub aggregate_enterprise_value: f64,
    /// Aggregate enterprise value less net debt.
    pub aggregate_equity_value: f64,
    /// Aggregate equity per share, when available.
    pub aggregate_share_price: Option<f64>,
}

impl ComparablesResult {
    /// Whether any requested metric had to be skipped.
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Collects peer multiples and aggregates them into implied valuations.
///
/// Non-finite peer observations are dropped before ranking. A metric
/// with no usable peers at all fails the aggregation; a metric whose
/// base the snapshot cannot supply is skipped and reported, so one bad
/// metric never poisons the others.
///
/// # Example
///
/// ```
/// use valuation_core::types::{Currency, FundamentalsSnapshot, MultipleKind, PeerMultiple};
/// use valuation_engine::comparables::MultiplesAggregator;
///
/// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
///     .revenue(10_000.0)
///     .ebit(1_500.0)
///     .d_and_a(400.0)
///     .build()
///     .unwrap();
///
/// let mut aggregator = MultiplesAggregator::new();
/// for (ticker, value) in [("PEER1", 8.0), ("PEER2", 10.0), ("PEER3", 12.0)] {
///     aggregator.add(PeerMultiple::new(ticker, MultipleKind::EvToEbitda, value));
/// }
///
/// let result = aggregator
///     .aggregate(&snapshot, &[MultipleKind::EvToEbitda])
///     .unwrap();
/// // Median multiple 10 on EBITDA of 1 900.
/// assert_eq!(result.aggregate_enterprise_value, 19_000.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiplesAggregator {
    /// Collected peer observations.
    peers: Vec<PeerMultiple>,
}

impl MultiplesAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self { peers: Vec::new() }
    }

    /// Create an aggregator seeded with a peer set.
    pub fn with_peers(peers: Vec<PeerMultiple>) -> Self {
        Self { peers }
    }

    /// Add one peer observation.
    pub fn add(&mut self, peer: PeerMultiple) {
        self.peers.push(peer);
    }

    /// Number of collected observations.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check if no observations have been collected.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Drop all collected observations.
    pub fn clear(&mut self) {
        self.peers.clear();
    }

    /// Distinct multiple kinds among the peers, in first-appearance
    /// order.
    pub fn metrics(&self) -> Vec<MultipleKind> {
        let mut seen = Vec::new();
        for peer in &self.peers {
            if !seen.contains(&peer.kind) {
                seen.push(peer.kind);
            }
        }
        seen
    }

    /// Aggregate the collected peers against a subject snapshot.
    ///
    /// An empty `requested` slice means "whatever the peers cover",
    /// in first-appearance order. Duplicate requests are collapsed.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::InsufficientPeers`] when a requested metric
    ///   has no usable peer observations
    /// - [`ValuationError::Computation`] when every requested metric
    ///   had to be skipped, or when there is nothing to aggregate at
    ///   all
    pub fn aggregate(
        &self,
        snapshot: &FundamentalsSnapshot,
        requested: &[MultipleKind],
    ) -> Result<ComparablesResult, ValuationError> {
        let metrics = if requested.is_empty() {
            self.metrics()
        } else {
            let mut distinct = Vec::with_capacity(requested.len());
            for metric in requested {
                if !distinct.contains(metric) {
                    distinct.push(*metric);
                }
            }
            distinct
        };
        if metrics.is_empty() {
            return Err(ValuationError::computation(
                "no peer multiples supplied and no metrics requested",
            ));
        }

        let net_debt = snapshot.net_debt();
        let shares = snapshot.shares_outstanding().filter(|s| *s > 0.0);

        let mut implied = Vec::new();
        let mut skipped = Vec::new();

        for metric in metrics {
            let values: Vec<f64> = self
                .peers
                .iter()
                .filter(|p| p.kind == metric && p.is_usable())
                .map(|p| p.value)
                .collect();
            if values.is_empty() {
                return Err(ValuationError::InsufficientPeers { metric });
            }

            let base_value = match snapshot.metric_value(metric).filter(|b| b.is_finite()) {
                Some(base) if base > 0.0 => base,
                Some(base) => {
                    skipped.push(SkippedMetric {
                        metric,
                        reason: SkipReason::NonPositiveBase { value: base },
                    });
                    continue;
                }
                None => {
                    skipped.push(SkippedMetric {
                        metric,
                        reason: SkipReason::MissingBase,
                    });
                    continue;
                }
            };

            let multiple = Quartiles::compute(&values).ok_or_else(|| {
                ValuationError::computation(format!("no usable {metric} multiples to rank"))
            })?;
            let enterprise_value = multiple.scale(base_value);
            let equity_value = enterprise_value.shift(-net_debt);
            let share_price = shares.map(|s| equity_value.scale(1.0 / s));

            implied.push(ImpliedValuation {
                metric,
                peer_count: values.len(),
                multiple,
                base_value,
                enterprise_value,
                equity_value,
                share_price,
            });
        }

        if implied.is_empty() {
            let names: Vec<&str> = skipped.iter().map(|s| s.metric.name()).collect();
            return Err(ValuationError::computation(format!(
                "no usable base metrics on the snapshot; skipped {}",
                names.join(", ")
            )));
        }

        let medians: Vec<f64> = implied.iter().map(|e| e.enterprise_value.p50).collect();
        let aggregate_enterprise_value = median(&medians).ok_or_else(|| {
            ValuationError::computation("aggregate enterprise value could not be computed")
        })?;
        let aggregate_equity_value = aggregate_enterprise_value - net_debt;
        let aggregate_share_price = shares.map(|s| aggregate_equity_value / s);

        Ok(ComparablesResult {
            implied,
            skipped,
            aggregate_enterprise_value,
            aggregate_equity_value,
            aggregate_share_price,
        })
    }
}
