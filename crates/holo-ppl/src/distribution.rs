use holo_core::{Result, RngHandle, SiteValue};
use serde::{Deserialize, Serialize};

/// Distribution that can be attached to a named sample site.
pub trait SiteDistribution {
    /// Draws a value from the distribution.
    fn sample(&self, rng: &mut RngHandle) -> SiteValue;

    /// Log density of `value`; fails on shape mismatch.
    fn log_prob(&self, value: &SiteValue) -> Result<f64>;

    /// Parameters recorded alongside the site in a trace.
    fn summary(&self) -> DistributionSummary;
}

/// Serializable description of the distribution a site was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Distribution family name.
    pub family: String,
    /// Location parameter.
    pub loc: SiteValue,
    /// Scale parameter.
    pub scale: f64,
}

impl DistributionSummary {
    /// Summary for a Normal family distribution.
    pub fn normal(loc: SiteValue, scale: f64) -> Self {
        Self {
            family: "normal".to_string(),
            loc,
            scale,
        }
    }
}
