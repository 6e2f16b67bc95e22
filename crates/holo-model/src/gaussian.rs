use holo_core::Result;
use holo_ppl::{Normal, NormalVec, ProbContext};
use ndarray::Array1;

use crate::model::{ForwardModel, ObservationModel, Unimplemented, LIKELIHOOD_SITE};
use crate::prior::{PriorSpec, SampledParameters};

/// Observation noise standard deviation of [`GaussianModel`].
pub const FIXED_NOISE_SD: f64 = 0.1;

/// Model with a Normal prior on every parameter and fixed observation noise.
///
/// The likelihood scale is `FIXED_NOISE_SD²`.
#[derive(Debug, Clone)]
pub struct GaussianModel<F> {
    priors: PriorSpec,
    forward_model: F,
}

impl<F: ForwardModel> GaussianModel<F> {
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

impl<X> GaussianModel<Unimplemented<X>> {
    /// Creates the model without a forward strategy.
    pub fn without_forward(priors: PriorSpec) -> Self {
        Self {
            priors,
            forward_model: Unimplemented::new(),
        }
    }
}

/// Samples `name ~ Normal(loc, scale)` for every entry, in declaration order.
pub(crate) fn sample_normal_priors(
    ctx: &mut ProbContext,
    priors: &PriorSpec,
) -> Result<SampledParameters> {
    let mut params = SampledParameters::new();
    for (name, prior) in priors.iter() {
        let value = ctx.sample(name, &Normal::new(prior.loc, prior.scale)?)?;
        params.insert(name, value);
    }
    Ok(params)
}

impl<F: ForwardModel> ObservationModel for GaussianModel<F> {
    type Input = F::Input;

    fn priors(&self) -> &PriorSpec {
        &self.priors
    }

    fn likelihood(&self, ctx: &mut ProbContext, x: &Self::Input) -> Result<Array1<f64>> {
        let params = sample_normal_priors(ctx, &self.priors)?;
        let expected = self.forward(x, &params)?;
        let dist = NormalVec::new(expected, FIXED_NOISE_SD.powi(2))?;
        Ok(ctx.sample(LIKELIHOOD_SITE, &dist)?.into_tensor())
    }

    fn forward(&self, x: &Self::Input, params: &SampledParameters) -> Result<Array1<f64>> {
        self.forward_model.forward(x, params)
    }
}
