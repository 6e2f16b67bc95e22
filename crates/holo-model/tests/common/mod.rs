#![allow(dead_code)]

use std::cell::RefCell;

use holo_core::Result;
use holo_model::{Hologram, PriorSpec, ScatteringCalculator, Sphere};
use ndarray::{Array2, Axis};

/// Fringe pattern centred under the sphere; deterministic and cheap.
#[derive(Debug, Default)]
pub struct FringeCalculator {
    pub calls: RefCell<Vec<(Sphere, f64)>>,
}

impl ScatteringCalculator for FringeCalculator {
    fn calc_holo(&self, hologram: &Hologram, sphere: &Sphere, scaling: f64) -> Result<Array2<f64>> {
        self.calls.borrow_mut().push((*sphere, scaling));
        let (rows, cols) = hologram.shape();
        let positions = hologram.pixel_positions();
        let k = 2.0 * std::f64::consts::PI * hologram.medium_index / hologram.wavelength;
        let contrast = (sphere.n - hologram.medium_index) * sphere.r;
        let z = sphere.center[2].abs().max(1e-6);
        let values: Vec<f64> = positions
            .axis_iter(Axis(0))
            .map(|pos| {
                let dx = pos[0] - sphere.center[0];
                let dy = pos[1] - sphere.center[1];
                let rho2 = dx * dx + dy * dy;
                1.0 + scaling * contrast / z * (k * rho2 / (2.0 * z)).cos()
            })
            .collect();
        Ok(Array2::from_shape_vec((rows, cols), values).expect("grid shape"))
    }
}

/// Calculator returning a grid of the wrong shape.
pub struct TruncatingCalculator;

impl ScatteringCalculator for TruncatingCalculator {
    fn calc_holo(&self, hologram: &Hologram, _sphere: &Sphere, _scaling: f64) -> Result<Array2<f64>> {
        let (rows, cols) = hologram.shape();
        Ok(Array2::zeros((rows.saturating_sub(1), cols)))
    }
}

pub fn sphere_priors() -> PriorSpec {
    PriorSpec::new()
        .with("x", 0.0, 1.0)
        .with("y", 0.0, 1.0)
        .with("z", 10.0, 1.0)
        .with("n", 1.5, 0.05)
        .with("r", 0.5, 0.05)
        .with("alpha", 1.0, 0.1)
        .with("noise_sd", 0.05, 0.1)
}

pub fn ones_hologram(rows: usize, cols: usize) -> Hologram {
    Hologram::new(Array2::ones((rows, cols)), 0.1, 0.66, 1.33)
}
