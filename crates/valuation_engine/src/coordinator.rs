//! Sequential orchestration of the valuation methodologies.

use tracing::{debug, warn};
use valuation_core::types::{
    FundamentalsSnapshot, MultipleKind, PeerMultiple, ValuationError, ValuationStage,
};

use crate::assumptions::{AssumptionInputs, AssumptionResolver, FallbackPolicy};
use crate::comparables::MultiplesAggregator;
use crate::dcf::DcfEngine;
use crate::report::{MethodOutcome, ValuationReport};

/// Runs assumption resolution, DCF and comparables for one company and
/// reconciles the outcomes into a single [`ValuationReport`].
///
/// The two methodologies are independent: a failure on one side is
/// recorded in the report while the other side still runs. Only when
/// both fail does the run itself fail, carrying the first error
/// encountered.
///
/// # Example
///
/// ```
/// use valuation_core::types::{Currency, FundamentalsSnapshot, MultipleKind, PeerMultiple};
/// use valuation_engine::assumptions::AssumptionInputs;
/// use valuation_engine::coordinator::ValuationCoordinator;
///
/// let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
///     .revenue(10_000.0)
///     .ebit(1_500.0)
///     .tax_rate(0.25)
///     .build()
///     .unwrap();
///
/// let peers = vec![
///     PeerMultiple::new("PEER1", MultipleKind::EvToEbit, 11.0),
///     PeerMultiple::new("PEER2", MultipleKind::EvToEbit, 13.0),
/// ];
///
/// let report = ValuationCoordinator::default()
///     .run(
///         &snapshot,
///         &AssumptionInputs::infer_from_snapshot(&snapshot),
///         &peers,
///         &[MultipleKind::EvToEbit],
///     )
///     .unwrap();
///
/// assert!(report.has_any_value());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationCoordinator {
    resolver: AssumptionResolver,
}

impl ValuationCoordinator {
    /// Create a coordinator with the given fallback policy.
    pub fn new(policy: FallbackPolicy) -> Self {
        Self {
            resolver: AssumptionResolver::new(policy),
        }
    }

    /// Value one company with both methodologies.
    ///
    /// An empty `requested` slice lets the peer set determine which
    /// multiples are used.
    ///
    /// # Errors
    ///
    /// Fails only when both methodologies fail; the error is the
    /// DCF-side one, tagged with the stage it arose in. Single-sided
    /// failures are reported inside the returned report instead.
    pub fn run(
        &self,
        snapshot: &FundamentalsSnapshot,
        inputs: &AssumptionInputs,
        peers: &[PeerMultiple],
        requested: &[MultipleKind],
    ) -> Result<ValuationReport, ValuationError> {
        debug!(ticker = snapshot.ticker(), "starting valuation run");

        let (assumptions, dcf) = match self.resolver.resolve(snapshot, inputs) {
            Ok(assumptions) => {
                let dcf = match DcfEngine::new(snapshot, &assumptions).value() {
                    Ok(result) => {
                        if result.implied_share_price.is_none() {
                            MethodOutcome::Partial {
                                value: result,
                                caveats: vec![String::from(
                                    "no positive share count on the snapshot; \
                                     implied share price omitted",
                                )],
                            }
                        } else {
                            MethodOutcome::Succeeded { value: result }
                        }
                    }
                    Err(err) => {
                        let err = err.at_stage(ValuationStage::DcfProjection);
                        warn!(ticker = snapshot.ticker(), error = %err, "DCF valuation failed");
                        MethodOutcome::Failed { error: err }
                    }
                };
                (Some(assumptions), dcf)
            }
            Err(err) => {
                let err = err.at_stage(ValuationStage::AssumptionResolution);
                warn!(ticker = snapshot.ticker(), error = %err, "assumption resolution failed");
                (None, MethodOutcome::Failed { error: err })
            }
        };

        let comparables =
            match MultiplesAggregator::with_peers(peers.to_vec()).aggregate(snapshot, requested) {
                Ok(result) => {
                    if result.is_partial() {
                        let caveats = result
                            .skipped
                            .iter()
                            .map(|s| format!("{} skipped: {}", s.metric, s.reason))
                            .collect();
                        MethodOutcome::Partial {
                            value: result,
                            caveats,
                        }
                    } else {
                        MethodOutcome::Succeeded { value: result }
                    }
                }
                Err(err) => {
                    let err = err.at_stage(ValuationStage::ComparablesAggregation);
                    warn!(ticker = snapshot.ticker(), error = %err, "comparables valuation failed");
                    MethodOutcome::Failed { error: err }
                }
            };

        if let (MethodOutcome::Failed { error }, MethodOutcome::Failed { .. }) =
            (&dcf, &comparables)
        {
            return Err(error.clone());
        }

        debug!(
            ticker = snapshot.ticker(),
            dcf = dcf.status(),
            comparables = comparables.status(),
            "valuation run complete"
        );

        Ok(ValuationReport {
            ticker: snapshot.ticker().to_string(),
            currency: snapshot.currency(),
            spot_share_price: snapshot.share_price(),
            assumptions,
            dcf,
            comparables,
        })
    }
}
