#![deny(missing_docs)]

//! Bayesian observation models for fitting the position, refractive index,
//! radius and scaling of a scattering sphere to a recorded hologram.
//!
//! Every model implements [`ObservationModel`]: `likelihood` samples the
//! priors through an explicit [`holo_ppl::ProbContext`], runs the forward
//! model and scores the observation; `call` conditions the `likelihood`
//! site on the observed data first.

/// YAML model configuration.
pub mod config;
/// Fixed-noise Gaussian prior model.
pub mod gaussian;
/// Sphere scattering forward model and holography model.
pub mod holography;
/// JSON trace manifests.
pub mod manifest;
/// Observation model contract and forward strategies.
pub mod model;
/// Noisy Gaussian prior model with log-domain noise.
pub mod noisy;
/// Prior specifications and sampled parameters.
pub mod prior;
/// Hologram measurements and the scattering calculator seam.
pub mod scattering;

pub use config::{ModelConfig, ModelKind, SeedPolicy};
pub use gaussian::{GaussianModel, FIXED_NOISE_SD};
pub use holography::{sphere_from_params, HolographyModel, SphereForward, SPHERE_PARAMS};
pub use manifest::TraceManifest;
pub use model::{
    BaseModel, ForwardFn, ForwardModel, ObservationModel, ObservationRecord, Unimplemented,
    LIKELIHOOD_SITE,
};
pub use noisy::{NoisyGaussianModel, NOISE_PARAM};
pub use prior::{Prior, PriorSpec, SampledParameters};
pub use scattering::{flatten, Hologram, ScatteringCalculator, Sphere};
