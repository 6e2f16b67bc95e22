use std::fs;
use std::path::Path;

use holo_core::errors::ErrorInfo;
use holo_core::{HoloError, Result};
use serde::{Deserialize, Serialize};

use crate::holography::SPHERE_PARAMS;
use crate::noisy::NOISE_PARAM;
use crate::prior::PriorSpec;

/// YAML-configurable description of an observation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which prior scheme and forward model to build.
    pub kind: ModelKind,
    /// Ordered parameter priors.
    pub priors: PriorSpec,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

/// Supported observation models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Normal priors, fixed observation noise.
    Gaussian,
    /// Normal priors, log-normal observation noise.
    NoisyGaussian,
    /// Noisy Gaussian priors over the sphere scattering forward model.
    Holography,
}

impl ModelKind {
    /// Stable name used in configs and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Gaussian => "gaussian",
            ModelKind::NoisyGaussian => "noisy-gaussian",
            ModelKind::Holography => "holography",
        }
    }

    /// Parameters a prior specification must declare for this kind.
    pub fn required_params(&self) -> Vec<&'static str> {
        match self {
            ModelKind::Gaussian => Vec::new(),
            ModelKind::NoisyGaussian => vec![NOISE_PARAM],
            ModelKind::Holography => {
                let mut params = SPHERE_PARAMS.to_vec();
                params.push(NOISE_PARAM);
                params
            }
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed from which evaluation substreams are derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

impl ModelConfig {
    /// Creates a configuration with the default seed policy.
    pub fn new(kind: ModelKind, priors: PriorSpec) -> Self {
        Self {
            kind,
            priors,
            seed_policy: SeedPolicy::default(),
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|err| HoloError::Config(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Loads a YAML configuration from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            HoloError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            HoloError::Config(info) => {
                HoloError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|err| HoloError::Config(ErrorInfo::new("config-serialize", err.to_string())))
    }

    /// Checks that every parameter required by `kind` has a prior.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = self
            .kind
            .required_params()
            .into_iter()
            .filter(|name| !self.priors.contains(name))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(HoloError::Config(
            ErrorInfo::new("missing-priors", "prior specification lacks required parameters")
                .with_context("kind", self.kind.as_str())
                .with_context("missing", missing.join(",")),
        ))
    }
}
