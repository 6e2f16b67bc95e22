use std::collections::BTreeMap;

use holo_core::{Result, RngHandle, SiteValue};
use tracing::trace;

use crate::distribution::SiteDistribution;
use crate::trace::{Site, Trace};

/// Explicit sampling context threaded through every model call.
///
/// Owns the random stream, the trace of visited sites and the set of
/// conditioned site values. Models never hold sampling state themselves.
#[derive(Debug, Clone)]
pub struct ProbContext {
    seed: u64,
    rng: RngHandle,
    trace: Trace,
    conditions: BTreeMap<String, SiteValue>,
}

impl ProbContext {
    /// Creates a context drawing from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: RngHandle::from_seed(seed),
            trace: Trace::new(),
            conditions: BTreeMap::new(),
        }
    }

    /// Creates the context for evaluation `index` of a run seeded with `master_seed`.
    pub fn for_substream(master_seed: u64, index: u64) -> Self {
        Self::from_seed(holo_core::derive_substream_seed(master_seed, index))
    }

    /// Seed the context was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Registers a named sample site.
    ///
    /// Conditioned names return the observed value and are scored against
    /// `dist`; all other names draw a fresh value from the context RNG.
    pub fn sample<D: SiteDistribution>(&mut self, name: &str, dist: &D) -> Result<SiteValue> {
        let (value, observed) = match self.conditions.get(name) {
            Some(value) => (value.clone(), true),
            None => (dist.sample(&mut self.rng), false),
        };
        let log_prob = dist.log_prob(&value)?;
        trace!(site = name, observed, log_prob, "recorded sample site");
        self.trace.record(Site {
            name: name.to_string(),
            value: value.clone(),
            distribution: dist.summary(),
            log_prob,
            observed,
        })?;
        Ok(value)
    }

    /// Fixes the value of site `name` for subsequent samples.
    pub fn condition(&mut self, name: impl Into<String>, value: impl Into<SiteValue>) {
        self.conditions.insert(name.into(), value.into());
    }

    /// Removes a condition, returning the previously observed value.
    pub fn uncondition(&mut self, name: &str) -> Option<SiteValue> {
        self.conditions.remove(name)
    }

    /// Returns true when `name` is currently conditioned.
    pub fn is_conditioned(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Runs `f` with `name` conditioned to `value`, restoring the prior state afterwards.
    pub fn with_condition<T>(
        &mut self,
        name: &str,
        value: impl Into<SiteValue>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let previous = self.conditions.insert(name.to_string(), value.into());
        let outcome = f(self);
        match previous {
            Some(previous) => {
                self.conditions.insert(name.to_string(), previous);
            }
            None => {
                self.conditions.remove(name);
            }
        }
        outcome
    }

    /// Trace recorded since the last reset.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Takes the recorded trace, leaving an empty one in place.
    pub fn take_trace(&mut self) -> Trace {
        std::mem::take(&mut self.trace)
    }

    /// Discards the recorded trace.
    pub fn clear_trace(&mut self) {
        self.trace = Trace::new();
    }
}
