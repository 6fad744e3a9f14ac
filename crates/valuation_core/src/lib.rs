//! # valuation_core: Foundation Types for Company Valuation
//!
//! ## Foundation Layer Role
//!
//! valuation_core is the bottom layer of the fairval workspace, providing:
//! - Company fundamentals snapshot: `FundamentalsSnapshot` (`types::fundamentals`)
//! - Peer multiple types: `MultipleKind`, `PeerMultiple` (`types::multiple`)
//! - Currency type: `Currency` (`types::currency`)
//! - Error taxonomy: `ValuationError`, `SnapshotError`, `CurrencyError` (`types::error`)
//! - Order statistics over peer data (`math::stats`)
//!
//! ## Zero Dependency Principle
//!
//! The foundation layer has no dependency on the engine or service crates,
//! with minimal external dependencies:
//! - thiserror: Structured error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use valuation_core::math::stats::median;
//! use valuation_core::types::{Currency, FundamentalsSnapshot};
//!
//! // Snapshot of trailing fundamentals
//! let snapshot = FundamentalsSnapshot::builder("ACME", Currency::USD)
//!     .revenue(10_000.0)
//!     .ebit(1_500.0)
//!     .total_debt(2_000.0)
//!     .cash(500.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(snapshot.net_debt(), 1_500.0);
//!
//! // Order statistics
//! let mid = median(&[8.0, 10.0, 12.0]);
//! assert_eq!(mid, Some(10.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for snapshot, multiple and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
