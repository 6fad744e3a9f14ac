//! Check command implementation
//!
//! Validates a valuation request without running the valuation: parses
//! the request, builds the snapshot, resolves assumptions and inspects
//! peer coverage, reporting each step.

use tracing::info;

use valuation_engine::{AssumptionResolver, MultiplesAggregator};

use crate::config::CliConfig;
use crate::input::{self, ValuationRequest};
use crate::{CliError, Result};

/// Run the check command
pub fn run(
    input_path: &str,
    peers_path: Option<&str>,
    infer: bool,
    config: &CliConfig,
) -> Result<()> {
    info!("Checking valuation request...");

    let mut failures = 0;

    let request = ValuationRequest::load(input_path)?;
    println!("Request file:     ok ({})", input_path);

    let snapshot = match request.snapshot.to_snapshot() {
        Ok(snapshot) => {
            println!(
                "Snapshot:         ok ({}, {}, revenue {:.2})",
                snapshot.ticker(),
                snapshot.currency(),
                snapshot.revenue()
            );
            Some(snapshot)
        }
        Err(err) => {
            println!("Snapshot:         FAILED ({})", err);
            failures += 1;
            None
        }
    };

    match &snapshot {
        Some(snapshot) => {
            let assumptions = if infer {
                input::overlay_inferred(
                    request.assumptions.clone(),
                    snapshot,
                    config.defaults.horizon,
                )
            } else {
                request.assumptions.clone()
            };
            let resolver = AssumptionResolver::new(config.fallback_policy());
            match resolver.resolve(snapshot, &assumptions) {
                Ok(resolved) => println!(
                    "Assumptions:      ok (horizon {}, WACC {:.2}%, terminal growth {:.2}%)",
                    resolved.horizon(),
                    resolved.wacc * 100.0,
                    resolved.terminal_growth * 100.0
                ),
                Err(err) => {
                    println!("Assumptions:      FAILED ({})", err);
                    failures += 1;
                }
            }
        }
        None => println!("Assumptions:      skipped (no snapshot)"),
    }

    match input::parse_metrics(&request.metrics) {
        Ok(kinds) if kinds.is_empty() => println!("Metrics:          ok (from peer coverage)"),
        Ok(kinds) => println!("Metrics:          ok ({} requested)", kinds.len()),
        Err(err) => {
            println!("Metrics:          FAILED ({})", err);
            failures += 1;
        }
    }

    match input::collect_peers(&request, peers_path) {
        Ok(peers) if peers.is_empty() => println!("Peers:            none supplied"),
        Ok(peers) => {
            let aggregator = MultiplesAggregator::with_peers(peers);
            println!(
                "Peers:            ok ({} multiples across {} metrics)",
                aggregator.len(),
                aggregator.metrics().len()
            );
        }
        Err(err) => {
            println!("Peers:            FAILED ({})", err);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(CliError::InvalidArgument(format!(
            "request failed {} check(s)",
            failures
        )));
    }

    info!("Check complete");
    Ok(())
}
