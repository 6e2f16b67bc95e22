use holo_core::Result;
use holo_model::{
    ForwardFn, NoisyGaussianModel, ObservationModel, ObservationRecord, PriorSpec,
    SampledParameters, LIKELIHOOD_SITE, NOISE_PARAM,
};
use holo_ppl::ProbContext;
use ndarray::{array, Array1};
use proptest::prelude::*;

type OffsetFn = fn(&Array1<f64>, &SampledParameters) -> Result<Array1<f64>>;

fn offset(x: &Array1<f64>, params: &SampledParameters) -> Result<Array1<f64>> {
    let shift = params.scalar("shift")?;
    Ok(x.mapv(|v| v + shift))
}

fn model(noise: (f64, f64)) -> NoisyGaussianModel<ForwardFn<Array1<f64>, OffsetFn>> {
    let priors = PriorSpec::new()
        .with("shift", 0.0, 1.0)
        .with(NOISE_PARAM, noise.0, noise.1);
    NoisyGaussianModel::new(priors, ForwardFn::new(offset as OffsetFn))
}

#[test]
fn noise_site_uses_log_domain_prior() {
    let model = model((0.05, 0.1));
    let mut ctx = ProbContext::from_seed(21);
    model.likelihood(&mut ctx, &array![0.0, 1.0]).unwrap();

    let site = ctx.trace().get(NOISE_PARAM).unwrap();
    assert_eq!(site.distribution.loc.as_scalar().unwrap(), 0.05f64.ln());
    assert_eq!(site.distribution.scale, 0.1f64.ln());
}

#[test]
fn likelihood_scale_is_squared_exponentiated_noise() {
    let model = model((0.05, 0.1));
    let mut ctx = ProbContext::from_seed(21);
    model.likelihood(&mut ctx, &array![0.0, 1.0]).unwrap();

    let trace = ctx.trace();
    let log_noise = trace.get(NOISE_PARAM).unwrap().value.as_scalar().unwrap();
    let scale = trace.get(LIKELIHOOD_SITE).unwrap().distribution.scale;
    assert_eq!(scale, log_noise.exp().powi(2));
    assert_eq!(
        scale,
        NoisyGaussianModel::<OffsetFn>::decode_noise(log_noise)
    );
}

#[test]
fn other_parameters_use_plain_normal_priors() {
    let model = model((0.05, 0.1));
    let mut ctx = ProbContext::from_seed(3);
    model.likelihood(&mut ctx, &array![0.0]).unwrap();
    let site = ctx.trace().get("shift").unwrap();
    assert_eq!(site.distribution.loc.as_scalar().unwrap(), 0.0);
    assert_eq!(site.distribution.scale, 1.0);
}

#[test]
fn missing_noise_parameter_is_a_model_error() {
    let priors = PriorSpec::new().with("shift", 0.0, 1.0);
    let model = NoisyGaussianModel::new(priors, ForwardFn::new(offset as OffsetFn));
    let mut ctx = ProbContext::from_seed(3);
    let err = model.likelihood(&mut ctx, &array![0.0]).unwrap_err();
    assert_eq!(err.info().code, "missing-parameter");
}

#[test]
fn unit_noise_scale_collapses_the_log_prior() {
    let model = model((0.05, 1.0));
    let mut ctx = ProbContext::from_seed(3);
    let err = model.likelihood(&mut ctx, &array![0.0]).unwrap_err();
    assert_eq!(err.info().code, "normal-scale");
}

#[test]
fn call_conditions_on_observation() {
    let model = model((0.05, 0.1));
    let mut ctx = ProbContext::from_seed(5);
    let record = ObservationRecord::new(array![0.0, 1.0, 2.0], array![0.1, 1.1, 2.1]);
    let out = model.call(&mut ctx, &record).unwrap();
    assert_eq!(out, record.y);
    assert!(ctx.trace().get(LIKELIHOOD_SITE).unwrap().observed);
}

proptest! {
    #[test]
    fn noise_transform_is_consistent(seed in any::<u64>(), loc in 0.01f64..2.0, scale in 0.05f64..0.9) {
        let model = model((loc, scale));
        let mut ctx = ProbContext::from_seed(seed);
        model.likelihood(&mut ctx, &array![0.0, 1.0]).unwrap();

        let trace = ctx.trace();
        let noise_site = trace.get(NOISE_PARAM).unwrap();
        prop_assert_eq!(noise_site.distribution.loc.as_scalar().unwrap(), loc.ln());
        prop_assert_eq!(noise_site.distribution.scale, scale.ln());

        let log_noise = noise_site.value.as_scalar().unwrap();
        let scale_used = trace.get(LIKELIHOOD_SITE).unwrap().distribution.scale;
        prop_assert_eq!(scale_used, log_noise.exp().powi(2));
    }
}
