//! Fairval CLI - Command Line Operations for Company Valuation
//!
//! This is the operational entry point for the fairval valuation library.
//!
//! # Commands
//!
//! - `fairval value --input <file>` - Value a company from a request file
//! - `fairval check --input <file>` - Validate a request without running it
//!
//! # Architecture
//!
//! As the Service layer of the workspace, this crate orchestrates the
//! core and engine layers behind a unified command-line interface.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

/// Fairval Company Valuation CLI
#[derive(Parser)]
#[command(name = "fairval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "fairval.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a company from a request file
    Value {
        /// Path to valuation request file (JSON)
        #[arg(short, long)]
        input: String,

        /// Path to peer multiples file (CSV: ticker,metric,value)
        #[arg(short, long)]
        peers: Option<String>,

        /// Comma-separated multiples to aggregate (e.g. EV/EBITDA,EV/EBIT)
        #[arg(short, long)]
        metrics: Option<String>,

        /// Output format (json, table)
        #[arg(short, long)]
        format: Option<String>,

        /// Fill missing assumptions from the snapshot before resolving
        #[arg(long)]
        infer: bool,
    },

    /// Validate a request file without running the valuation
    Check {
        /// Path to valuation request file (JSON)
        #[arg(short, long)]
        input: String,

        /// Path to peer multiples file (CSV: ticker,metric,value)
        #[arg(short, long)]
        peers: Option<String>,

        /// Fill missing assumptions from the snapshot before resolving
        #[arg(long)]
        infer: bool,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = config::CliConfig::load(&cli.config)?;

    match cli.command {
        Commands::Value {
            input,
            peers,
            metrics,
            format,
            infer,
        } => commands::value::run(
            &input,
            peers.as_deref(),
            metrics.as_deref(),
            format.as_deref(),
            infer,
            &config,
        ),
        Commands::Check {
            input,
            peers,
            infer,
        } => commands::check::run(&input, peers.as_deref(), infer, &config),
    }
}
