use holo_core::errors::ErrorInfo;
use holo_core::{HoloError, Result, RngHandle, SiteValue};
use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::distribution::{DistributionSummary, SiteDistribution};

/// `ln(sqrt(2π))`.
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

fn validate(loc: f64, scale: f64) -> Result<()> {
    if !loc.is_finite() {
        return Err(HoloError::Distribution(
            ErrorInfo::new("normal-loc", "location must be finite")
                .with_context("loc", loc.to_string()),
        ));
    }
    if !scale.is_finite() || scale == 0.0 {
        return Err(HoloError::Distribution(
            ErrorInfo::new("normal-scale", "scale must be finite and non-zero")
                .with_context("scale", scale.to_string()),
        ));
    }
    Ok(())
}

fn standard_draw(rng: &mut RngHandle) -> f64 {
    unit_normal(rng.inner_mut())
}

fn unit_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(StandardNormal)
}

/// Log density of `N(loc, |scale|)` at `x`.
pub fn normal_logpdf(x: f64, loc: f64, scale: f64) -> f64 {
    let sigma = scale.abs();
    let z = (x - loc) / sigma;
    -0.5 * z * z - sigma.ln() - LN_SQRT_2PI
}

/// Scalar Normal distribution with reparameterized draws `loc + scale * z`.
///
/// Negative scales are accepted: draws follow the reparameterized form and
/// densities use `|scale|`. The log-space noise prior relies on this because
/// `ln(scale)` is negative for scales below one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    loc: f64,
    scale: f64,
}

impl Normal {
    /// Creates the distribution, rejecting non-finite parameters and a zero scale.
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        validate(loc, scale)?;
        Ok(Self { loc, scale })
    }

    /// Location parameter.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Scale parameter as supplied.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Draws a single value.
    pub fn draw(&self, rng: &mut RngHandle) -> f64 {
        self.loc + self.scale * standard_draw(rng)
    }

    /// Log density at `x`.
    pub fn log_density(&self, x: f64) -> f64 {
        normal_logpdf(x, self.loc, self.scale)
    }
}

impl SiteDistribution for Normal {
    fn sample(&self, rng: &mut RngHandle) -> SiteValue {
        SiteValue::Scalar(self.draw(rng))
    }

    fn log_prob(&self, value: &SiteValue) -> Result<f64> {
        let x = value.as_scalar().ok_or_else(|| {
            HoloError::Model(
                ErrorInfo::new("shape-mismatch", "scalar distribution scored a tensor")
                    .with_context("len", value.len().to_string()),
            )
        })?;
        Ok(self.log_density(x))
    }

    fn summary(&self) -> DistributionSummary {
        DistributionSummary::normal(SiteValue::Scalar(self.loc), self.scale)
    }
}

/// Independent Normal over a flat tensor with per-element location and shared scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalVec {
    loc: Array1<f64>,
    scale: f64,
}

impl NormalVec {
    /// Creates the distribution; every location element must be finite.
    pub fn new(loc: Array1<f64>, scale: f64) -> Result<Self> {
        validate(0.0, scale)?;
        if let Some(index) = loc.iter().position(|value| !value.is_finite()) {
            return Err(HoloError::Distribution(
                ErrorInfo::new("normal-loc", "location must be finite")
                    .with_context("index", index.to_string()),
            ));
        }
        Ok(Self { loc, scale })
    }

    /// Per-element location.
    pub fn loc(&self) -> &Array1<f64> {
        &self.loc
    }

    /// Shared scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl SiteDistribution for NormalVec {
    fn sample(&self, rng: &mut RngHandle) -> SiteValue {
        let draws = self.loc.mapv(|loc| loc + self.scale * standard_draw(rng));
        SiteValue::Tensor(draws)
    }

    fn log_prob(&self, value: &SiteValue) -> Result<f64> {
        let observed = match value {
            SiteValue::Tensor(values) => values.view(),
            SiteValue::Scalar(x) if self.loc.len() == 1 => {
                return Ok(normal_logpdf(*x, self.loc[0], self.scale));
            }
            SiteValue::Scalar(_) => {
                return Err(shape_mismatch(self.loc.len(), 1));
            }
        };
        if observed.len() != self.loc.len() {
            return Err(shape_mismatch(self.loc.len(), observed.len()));
        }
        Ok(observed
            .iter()
            .zip(self.loc.iter())
            .map(|(x, loc)| normal_logpdf(*x, *loc, self.scale))
            .sum())
    }

    fn summary(&self) -> DistributionSummary {
        DistributionSummary::normal(SiteValue::Tensor(self.loc.clone()), self.scale)
    }
}

fn shape_mismatch(expected: usize, actual: usize) -> HoloError {
    HoloError::Model(
        ErrorInfo::new("shape-mismatch", "observed value does not match the distribution shape")
            .with_context("expected", expected.to_string())
            .with_context("actual", actual.to_string()),
    )
}
