//! Discounted cash flow valuation.
//!
//! [`DcfEngine`] projects unlevered free cash flow over the explicit
//! horizon, discounts at the resolved cost of capital, and caps the
//! projection with a Gordon growth terminal value.

pub mod engine;
pub mod projection;

pub use engine::DcfEngine;
pub use projection::{DcfResult, ProjectedYear};
