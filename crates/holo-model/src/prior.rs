use holo_core::{HoloError, Result, SiteValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// `(loc, scale)` pair describing the prior of one parameter.
///
/// Serialized as a two element sequence, e.g. `x: [0.0, 1.0]` in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Prior {
    /// Distribution location.
    pub loc: f64,
    /// Distribution scale.
    pub scale: f64,
}

impl Prior {
    /// Creates a prior entry.
    pub const fn new(loc: f64, scale: f64) -> Self {
        Self { loc, scale }
    }
}

impl From<(f64, f64)> for Prior {
    fn from((loc, scale): (f64, f64)) -> Self {
        Self { loc, scale }
    }
}

impl From<Prior> for (f64, f64) {
    fn from(prior: Prior) -> Self {
        (prior.loc, prior.scale)
    }
}

/// Ordered mapping from parameter name to its prior.
///
/// Iteration follows insertion order, which fixes the order in which sample
/// sites appear in a trace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorSpec {
    entries: IndexMap<String, Prior>,
}

impl PriorSpec {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a specification from `(name, (loc, scale))` pairs, keeping their order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, pair)| (name.into(), Prior::from(pair)))
                .collect(),
        }
    }

    /// Adds or replaces an entry, returning the updated specification.
    pub fn with(mut self, name: impl Into<String>, loc: f64, scale: f64) -> Self {
        self.entries.insert(name.into(), Prior::new(loc, scale));
        self
    }

    /// Prior for `name`.
    pub fn get(&self, name: &str) -> Option<&Prior> {
        self.entries.get(name)
    }

    /// Returns true when `name` has a prior.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prior)> + '_ {
        self.entries.iter().map(|(name, prior)| (name.as_str(), prior))
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no parameter is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 over the ordered entries, hex encoded.
    pub fn canonical_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, prior) in &self.entries {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(prior.loc.to_bits().to_le_bytes());
            hasher.update(prior.scale.to_bits().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Parameter values drawn during one model evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampledParameters {
    values: IndexMap<String, SiteValue>,
}

impl SampledParameters {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the value drawn for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SiteValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value for `name`.
    pub fn get(&self, name: &str) -> Option<&SiteValue> {
        self.values.get(name)
    }

    /// Scalar value for `name`; missing or tensor-valued parameters are model errors.
    pub fn scalar(&self, name: &str) -> Result<f64> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| HoloError::missing_parameter(name))?;
        value.as_scalar().ok_or_else(|| {
            HoloError::Model(
                holo_core::ErrorInfo::new("non-scalar-parameter", "parameter is not a scalar")
                    .with_context("name", name)
                    .with_context("len", value.len().to_string()),
            )
        })
    }

    /// Parameter names in sampling order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Number of sampled parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for SampledParameters {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut params = SampledParameters::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
