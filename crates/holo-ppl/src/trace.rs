use holo_core::errors::ErrorInfo;
use holo_core::{HoloError, Result, SiteValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::distribution::DistributionSummary;

/// A named random variable recorded during one model evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Site name, unique within a trace.
    pub name: String,
    /// Drawn or observed value.
    pub value: SiteValue,
    /// Distribution the value was drawn from or scored against.
    pub distribution: DistributionSummary,
    /// Log density of `value` under `distribution`.
    pub log_prob: f64,
    /// Whether the value was fixed by conditioning.
    pub observed: bool,
}

/// Ordered record of the sample sites visited by one evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    sites: IndexMap<String, Site>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a site, rejecting names already present.
    pub fn record(&mut self, site: Site) -> Result<()> {
        if self.sites.contains_key(&site.name) {
            return Err(HoloError::Model(
                ErrorInfo::new("duplicate-site", "sample site recorded twice in one trace")
                    .with_context("name", site.name.clone())
                    .with_hint("clear the context trace between model invocations"),
            ));
        }
        self.sites.insert(site.name.clone(), site);
        Ok(())
    }

    /// Looks up a site by name.
    pub fn get(&self, name: &str) -> Option<&Site> {
        self.sites.get(name)
    }

    /// Site names in visiting order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sites.keys().map(String::as_str)
    }

    /// Sites in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = &Site> + '_ {
        self.sites.values()
    }

    /// Number of recorded sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true when no site has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sum of the log densities of every site.
    pub fn log_joint(&self) -> f64 {
        self.sites.values().map(|site| site.log_prob).sum()
    }

    /// Sum of the log densities of the observed sites only.
    pub fn log_likelihood(&self) -> f64 {
        self.sites
            .values()
            .filter(|site| site.observed)
            .map(|site| site.log_prob)
            .sum()
    }
}
