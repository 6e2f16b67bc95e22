use holo_core::Result;
use holo_ppl::{Normal, NormalVec, ProbContext};
use ndarray::Array1;

use crate::model::{ForwardModel, ObservationModel, Unimplemented, LIKELIHOOD_SITE};
use crate::prior::{Prior, PriorSpec, SampledParameters};

/// Parameter holding the log-domain observation noise.
pub const NOISE_PARAM: &str = "noise_sd";

/// Model with Normal priors and an inferred observation noise.
///
/// The `noise_sd` entry `(loc, scale)` is sampled as
/// `Normal(ln(loc), ln(scale))` and stored in log space. The likelihood
/// scale is `exp(noise_sd)²`.
///
/// `ln(scale)` is used directly as the log-domain scale rather than a
/// delta-method estimate; this matches the established parameterization and
/// is kept for parity. For `scale < 1` the log-domain scale is negative and
/// draws are mirrored around `ln(loc)`.
#[derive(Debug, Clone)]
pub struct NoisyGaussianModel<F> {
    priors: PriorSpec,
    forward_model: F,
}

impl<F: ForwardModel> NoisyGaussianModel<F> {
    /// Creates the model from its priors and forward strategy.
    pub fn new(priors: PriorSpec, forward_model: F) -> Self {
        Self {
            priors,
            forward_model,
        }
    }

    /// Forward strategy.
    pub fn forward_model(&self) -> &F {
        &self.forward_model
    }
}

impl<X> NoisyGaussianModel<Unimplemented<X>> {
    /// Creates the model without a forward strategy.
    pub fn without_forward(priors: PriorSpec) -> Self {
        Self {
            priors,
            forward_model: Unimplemented::new(),
        }
    }
}

impl<F> NoisyGaussianModel<F> {
    /// Log-domain prior used for the noise parameter.
    pub fn noise_prior(prior: &Prior) -> Result<Normal> {
        Normal::new(prior.loc.ln(), prior.scale.ln())
    }

    /// Maps a log-domain noise draw to the likelihood scale.
    pub fn decode_noise(log_noise: f64) -> f64 {
        log_noise.exp().powi(2)
    }
}

impl<F: ForwardModel> ObservationModel for NoisyGaussianModel<F> {
    type Input = F::Input;

    fn priors(&self) -> &PriorSpec {
        &self.priors
    }

    fn likelihood(&self, ctx: &mut ProbContext, x: &Self::Input) -> Result<Array1<f64>> {
        let mut params = SampledParameters::new();
        for (name, prior) in self.priors.iter() {
            let dist = if name == NOISE_PARAM {
                Self::noise_prior(prior)?
            } else {
                Normal::new(prior.loc, prior.scale)?
            };
            let value = ctx.sample(name, &dist)?;
            params.insert(name, value);
        }

        let expected = self.forward(x, &params)?;
        let noise = Self::decode_noise(params.scalar(NOISE_PARAM)?);
        let dist = NormalVec::new(expected, noise)?;
        Ok(ctx.sample(LIKELIHOOD_SITE, &dist)?.into_tensor())
    }

    fn forward(&self, x: &Self::Input, params: &SampledParameters) -> Result<Array1<f64>> {
        self.forward_model.forward(x, params)
    }
}
