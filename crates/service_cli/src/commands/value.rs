//! Value command implementation
//!
//! Runs the full valuation pipeline (assumption resolution, DCF,
//! comparable multiples) for one company and renders the report.

use tracing::info;

use valuation_core::types::{Currency, MultipleKind};
use valuation_engine::{ComparablesResult, DcfResult, MethodOutcome, ValuationCoordinator};

use crate::config::CliConfig;
use crate::input::{self, ValuationRequest};
use crate::{CliError, Result};

/// Run the value command
pub fn run(
    input_path: &str,
    peers_path: Option<&str>,
    metrics_arg: Option<&str>,
    format_arg: Option<&str>,
    infer: bool,
    config: &CliConfig,
) -> Result<()> {
    info!("Starting valuation...");
    info!("  Request: {}", input_path);
    info!("  Peers: {}", peers_path.unwrap_or("none"));

    let request = ValuationRequest::load(input_path)?;
    let snapshot = request.snapshot.to_snapshot()?;

    let mut assumptions = request.assumptions.clone();
    if infer {
        info!("  Inferring missing assumptions from snapshot");
        assumptions = input::overlay_inferred(assumptions, &snapshot, config.defaults.horizon);
    }

    let peers = input::collect_peers(&request, peers_path)?;

    let requested = requested_metrics(metrics_arg, &request, config)?;
    info!("  Metrics: {}", describe_metrics(&requested));

    let coordinator = ValuationCoordinator::new(config.fallback_policy());
    let report = coordinator.run(&snapshot, &assumptions, &peers, &requested)?;

    let format = format_arg.unwrap_or(config.defaults.format.as_str());
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "table" => {
            println!("\nValuation of {} ({})", report.ticker, report.currency);
            if let Some(spot) = report.spot_share_price {
                println!(
                    "  Spot share price:        {:>14}",
                    format_price(report.currency, spot)
                );
            }
            print_dcf(&report.dcf, report.currency);
            print_comparables(&report.comparables, report.currency);
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    info!("Valuation complete");
    Ok(())
}

/// Metric selection precedence: command-line flag, then the request
/// file, then the configuration defaults. An empty result means the
/// aggregator follows peer coverage.
fn requested_metrics(
    metrics_arg: Option<&str>,
    request: &ValuationRequest,
    config: &CliConfig,
) -> Result<Vec<MultipleKind>> {
    if let Some(arg) = metrics_arg {
        let labels: Vec<String> = arg.split(',').map(str::to_string).collect();
        return input::parse_metrics(&labels);
    }
    if !request.metrics.is_empty() {
        return input::parse_metrics(&request.metrics);
    }
    input::parse_metrics(&config.defaults.metrics)
}

fn describe_metrics(requested: &[MultipleKind]) -> String {
    if requested.is_empty() {
        "from peer coverage".to_string()
    } else {
        requested
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Per-share prices carry the currency symbol; aggregate figures stay
/// bare since the header already names the currency.
fn format_price(currency: Currency, value: f64) -> String {
    format!("{}{:.2}", currency.symbol(), value)
}

fn print_dcf(outcome: &MethodOutcome<DcfResult>, currency: Currency) {
    let result = match outcome.value() {
        Some(result) => result,
        None => {
            if let Some(error) = outcome.error() {
                println!("\nDCF valuation: failed ({})", error);
            }
            return;
        }
    };

    println!("\nDCF valuation");
    println!("┌──────┬────────────┬────────────┬────────────┬────────────┐");
    println!("│ Year │ Revenue    │ EBIT       │ FCF        │ PV         │");
    println!("├──────┼────────────┼────────────┼────────────┼────────────┤");
    for year in &result.years {
        println!(
            "│ {:>4} │ {:>10.2} │ {:>10.2} │ {:>10.2} │ {:>10.2} │",
            year.year, year.revenue, year.ebit, year.fcf, year.present_value
        );
    }
    println!("└──────┴────────────┴────────────┴────────────┴────────────┘");
    println!("  PV of explicit horizon:  {:>14.2}", result.pv_explicit);
    println!("  PV of terminal value:    {:>14.2}", result.pv_terminal);
    println!("  Enterprise value:        {:>14.2}", result.enterprise_value);
    println!("  Equity value:            {:>14.2}", result.equity_value);
    if let Some(price) = result.implied_share_price {
        println!(
            "  Implied share price:     {:>14}",
            format_price(currency, price)
        );
    }
    for caveat in outcome.caveats() {
        println!("  Note: {}", caveat);
    }
}

fn print_comparables(outcome: &MethodOutcome<ComparablesResult>, currency: Currency) {
    let result = match outcome.value() {
        Some(result) => result,
        None => {
            if let Some(error) = outcome.error() {
                println!("\nComparables valuation: failed ({})", error);
            }
            return;
        }
    };

    println!("\nComparables valuation");
    println!("┌────────────┬───────┬────────────┬────────────┬────────────┐");
    println!("│ Multiple   │ Peers │ EV (p25)   │ EV (p50)   │ EV (p75)   │");
    println!("├────────────┼───────┼────────────┼────────────┼────────────┤");
    for implied in &result.implied {
        println!(
            "│ {:<10} │ {:>5} │ {:>10.2} │ {:>10.2} │ {:>10.2} │",
            implied.metric.name(),
            implied.peer_count,
            implied.enterprise_value.p25,
            implied.enterprise_value.p50,
            implied.enterprise_value.p75
        );
    }
    println!("└────────────┴───────┴────────────┴────────────┴────────────┘");
    println!(
        "  Aggregate enterprise value: {:>11.2}",
        result.aggregate_enterprise_value
    );
    println!(
        "  Aggregate equity value:     {:>11.2}",
        result.aggregate_equity_value
    );
    if let Some(price) = result.aggregate_share_price {
        println!(
            "  Aggregate share price:      {:>11}",
            format_price(currency, price)
        );
    }
    for caveat in outcome.caveats() {
        println!("  Note: {}", caveat);
    }
}
