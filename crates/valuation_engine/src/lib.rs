//! # Valuation Engine (L2: Methodology)
//!
//! Intrinsic and relative valuation methodologies for company analysis.
//!
//! This crate provides:
//! - Assumption resolution with explicit fallback policies
//! - Multi-year free cash flow projection and discounting (DCF)
//! - Gordon growth terminal values
//! - Comparable-company multiples aggregation with quartile bands
//! - A coordinator that reconciles both methodologies into one report
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          valuation_engine (L2)           │
//! ├──────────────────────────────────────────┤
//! │  assumptions/ - FallbackPolicy,          │
//! │                 AssumptionResolver       │
//! │  dcf/         - projection, discounting, │
//! │                 terminal value           │
//! │  comparables/ - multiples aggregation    │
//! │  report       - per-method outcomes      │
//! │  coordinator  - methodology runner       │
//! └──────────────────────────────────────────┘
//!          ↓
//! ┌──────────────────────────────────────────┐
//! │           valuation_core (L1)            │
//! │  snapshot types, order statistics        │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use valuation_core::types::{Currency, FundamentalsSnapshot};
//! use valuation_engine::assumptions::{AssumptionInputs, AssumptionResolver, FallbackPolicy};
//! use valuation_engine::dcf::DcfEngine;
//!
//! let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
//!     .revenue(10_000.0)
//!     .ebit(1_500.0)
//!     .tax_rate(0.25)
//!     .build()
//!     .unwrap();
//!
//! let inputs = AssumptionInputs::new()
//!     .with_wacc(0.09)
//!     .with_terminal_growth(0.025)
//!     .with_revenue_growth(vec![0.05; 5])
//!     .with_ebit_margin(vec![0.15; 5]);
//!
//! let resolver = AssumptionResolver::new(FallbackPolicy::default());
//! let assumptions = resolver.resolve(&snapshot, &inputs).unwrap();
//!
//! let valuation = DcfEngine::new(&snapshot, &assumptions).value().unwrap();
//! assert!(valuation.enterprise_value > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod assumptions;
pub mod comparables;
pub mod coordinator;
pub mod dcf;
pub mod report;

// Re-export commonly used types
pub use assumptions::{AssumptionInputs, AssumptionResolver, Assumptions, FallbackPolicy};
pub use comparables::{
    ComparablesResult, ImpliedValuation, MultiplesAggregator, SkipReason, SkippedMetric,
};
pub use coordinator::ValuationCoordinator;
pub use dcf::{DcfEngine, DcfResult, ProjectedYear};
pub use report::{MethodOutcome, ValuationReport};
