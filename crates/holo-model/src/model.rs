use std::marker::PhantomData;

use holo_core::{HoloError, Result};
use holo_ppl::ProbContext;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prior::{PriorSpec, SampledParameters};

/// Name of the sample site holding the observed output.
pub const LIKELIHOOD_SITE: &str = "likelihood";

/// Input paired with the observed output it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord<X> {
    /// Input handed to the forward model.
    pub x: X,
    /// Observed output, flattened.
    pub y: Array1<f64>,
}

impl<X> ObservationRecord<X> {
    /// Pairs an input with its observation.
    pub fn new(x: X, y: Array1<f64>) -> Self {
        Self { x, y }
    }
}

/// Deterministic map from input and sampled parameters to an expected output.
pub trait ForwardModel {
    /// Input consumed by the map.
    type Input;

    /// Computes the expected output.
    fn forward(&self, x: &Self::Input, params: &SampledParameters) -> Result<Array1<f64>>;
}

/// Forward strategy that always fails with [`HoloError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unimplemented<X>(PhantomData<fn() -> X>);

impl<X> Unimplemented<X> {
    /// Creates the placeholder strategy.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<X> ForwardModel for Unimplemented<X> {
    type Input = X;

    fn forward(&self, _x: &X, _params: &SampledParameters) -> Result<Array1<f64>> {
        Err(HoloError::not_implemented("forward"))
    }
}

/// Forward strategy backed by a closure.
#[derive(Clone)]
pub struct ForwardFn<X, F> {
    func: F,
    _input: PhantomData<fn() -> X>,
}

impl<X, F> ForwardFn<X, F>
where
    F: Fn(&X, &SampledParameters) -> Result<Array1<f64>>,
{
    /// Wraps `func` as a forward strategy.
    pub fn new(func: F) -> Self {
        Self {
            func,
            _input: PhantomData,
        }
    }
}

impl<X, F> ForwardModel for ForwardFn<X, F>
where
    F: Fn(&X, &SampledParameters) -> Result<Array1<f64>>,
{
    type Input = X;

    fn forward(&self, x: &X, params: &SampledParameters) -> Result<Array1<f64>> {
        (self.func)(x, params)
    }
}

/// Contract shared by every observation model.
///
/// `likelihood` samples the priors, evaluates `forward` and scores the
/// observation at [`LIKELIHOOD_SITE`]. Both default to
/// [`HoloError::NotImplemented`]; concrete models override them.
pub trait ObservationModel {
    /// Input consumed by the forward model.
    type Input;

    /// Prior specification the model was built with.
    fn priors(&self) -> &PriorSpec;

    /// Parameter names in declaration order.
    fn param_names(&self) -> Vec<&str> {
        self.priors().names().collect()
    }

    /// Samples parameters and the output distribution, returning the output draw.
    fn likelihood(&self, _ctx: &mut ProbContext, _x: &Self::Input) -> Result<Array1<f64>> {
        Err(HoloError::not_implemented("likelihood"))
    }

    /// Maps sampled parameters and input to the expected output.
    fn forward(&self, _x: &Self::Input, _params: &SampledParameters) -> Result<Array1<f64>> {
        Err(HoloError::not_implemented("forward"))
    }

    /// Runs `likelihood` with the output site conditioned on `record.y`.
    fn call(
        &self,
        ctx: &mut ProbContext,
        record: &ObservationRecord<Self::Input>,
    ) -> Result<Array1<f64>> {
        debug!(
            seed = ctx.seed(),
            observed = record.y.len(),
            params = self.priors().len(),
            "invoking observation model"
        );
        ctx.with_condition(LIKELIHOOD_SITE, record.y.clone(), |ctx| {
            self.likelihood(ctx, &record.x)
        })
    }
}

/// Model carrying only a prior specification; both strategy methods fail.
#[derive(Debug, Clone)]
pub struct BaseModel<X = Array1<f64>> {
    priors: PriorSpec,
    _input: PhantomData<fn() -> X>,
}

impl<X> BaseModel<X> {
    /// Creates the model.
    pub fn new(priors: PriorSpec) -> Self {
        Self {
            priors,
            _input: PhantomData,
        }
    }
}

impl<X> ObservationModel for BaseModel<X> {
    type Input = X;

    fn priors(&self) -> &PriorSpec {
        &self.priors
    }
}
