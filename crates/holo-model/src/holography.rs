use holo_core::errors::ErrorInfo;
use holo_core::{HoloError, Result};
use holo_ppl::ProbContext;
use ndarray::Array1;
use tracing::debug;

use crate::config::{ModelConfig, ModelKind};
use crate::model::{ForwardModel, ObservationModel, ObservationRecord};
use crate::noisy::NoisyGaussianModel;
use crate::prior::{PriorSpec, SampledParameters};
use crate::scattering::{shape_mismatch, Hologram, ScatteringCalculator, Sphere};

/// Parameters the sphere forward model reads from a sample.
pub const SPHERE_PARAMS: [&str; 6] = ["x", "y", "z", "n", "r", "alpha"];

/// Forward strategy that renders a sphere hologram through a calculator.
#[derive(Debug, Clone)]
pub struct SphereForward<C> {
    calculator: C,
}

impl<C: ScatteringCalculator> SphereForward<C> {
    /// Wraps a calculator.
    pub fn new(calculator: C) -> Self {
        Self { calculator }
    }

    /// Underlying calculator.
    pub fn calculator(&self) -> &C {
        &self.calculator
    }
}

/// Builds the sphere and scaling factor described by `params`.
pub fn sphere_from_params(params: &SampledParameters) -> Result<(Sphere, f64)> {
    let sphere = Sphere {
        center: [params.scalar("x")?, params.scalar("y")?, params.scalar("z")?],
        n: params.scalar("n")?,
        r: params.scalar("r")?,
    };
    Ok((sphere, params.scalar("alpha")?))
}

impl<C: ScatteringCalculator> ForwardModel for SphereForward<C> {
    type Input = Hologram;

    fn forward(&self, x: &Hologram, params: &SampledParameters) -> Result<Array1<f64>> {
        let (sphere, alpha) = sphere_from_params(params)?;
        debug!(?sphere, alpha, "calculating sphere hologram");
        let simulated = self.calculator.calc_holo(x, &sphere, alpha)?;
        if simulated.dim() != x.shape() {
            return Err(shape_mismatch(x.shape(), simulated.dim()));
        }
        Ok(crate::scattering::flatten(&simulated))
    }
}

/// Sphere fitting model: noisy Gaussian priors over a scattering forward model.
#[derive(Debug, Clone)]
pub struct HolographyModel<C> {
    inner: NoisyGaussianModel<SphereForward<C>>,
}

impl<C: ScatteringCalculator> HolographyModel<C> {
    /// Creates the model from its priors and a scattering calculator.
    pub fn new(priors: PriorSpec, calculator: C) -> Self {
        Self {
            inner: NoisyGaussianModel::new(priors, SphereForward::new(calculator)),
        }
    }

    /// Creates the model from a configuration of kind `holography`.
    pub fn from_config(config: &ModelConfig, calculator: C) -> Result<Self> {
        if config.kind != ModelKind::Holography {
            return Err(HoloError::Config(
                ErrorInfo::new("model-kind", "configuration does not describe a holography model")
                    .with_context("kind", config.kind.as_str()),
            ));
        }
        config.validate()?;
        Ok(Self::new(config.priors.clone(), calculator))
    }

    /// Underlying calculator.
    pub fn calculator(&self) -> &C {
        self.inner.forward_model().calculator()
    }

    /// Packages a measurement as an observation: the hologram itself is the
    /// input and its flattened values are the observed output.
    pub fn convert_holopy(&self, data: Hologram) -> ObservationRecord<Hologram> {
        let y = data.flattened();
        ObservationRecord::new(data, y)
    }
}

impl<C: ScatteringCalculator> ObservationModel for HolographyModel<C> {
    type Input = Hologram;

    fn priors(&self) -> &PriorSpec {
        self.inner.priors()
    }

    fn likelihood(&self, ctx: &mut ProbContext, x: &Hologram) -> Result<Array1<f64>> {
        self.inner.likelihood(ctx, x)
    }

    fn forward(&self, x: &Hologram, params: &SampledParameters) -> Result<Array1<f64>> {
        self.inner.forward(x, params)
    }
}
