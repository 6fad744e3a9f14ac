//! Assumption resolution for valuation runs.
//!
//! Callers rarely supply a complete assumption set. This module resolves
//! partial [`AssumptionInputs`] against snapshot-derived ratios and an
//! explicit [`FallbackPolicy`], producing the fully concrete
//! [`Assumptions`] record the engines consume. Resolution is the only
//! place defaults are applied; the engines never guess.

pub mod inputs;
pub mod policy;
pub mod resolver;

pub use inputs::AssumptionInputs;
pub use policy::FallbackPolicy;
pub use resolver::{AssumptionResolver, Assumptions};
