#![deny(missing_docs)]

//! Probabilistic primitives for the holo models: Normal distributions, traces
//! of named sample sites and the explicit [`ProbContext`] handle that replaces
//! an ambient trace.

/// Explicit sampling context.
pub mod context;
/// Site distribution trait and serializable summaries.
pub mod distribution;
/// Normal distributions and log densities.
pub mod normal;
/// Ordered traces of sample sites.
pub mod trace;

pub use context::ProbContext;
pub use distribution::{DistributionSummary, SiteDistribution};
pub use normal::{normal_logpdf, Normal, NormalVec};
pub use trace::{Site, Trace};
