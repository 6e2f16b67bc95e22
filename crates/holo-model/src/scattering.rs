use holo_core::errors::ErrorInfo;
use holo_core::{HoloError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Scattering sphere handed to a [`ScatteringCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center coordinates `(x, y, z)`.
    pub center: [f64; 3],
    /// Refractive index.
    pub n: f64,
    /// Radius.
    pub r: f64,
}

/// Recorded hologram: image values plus the coordinate metadata a calculator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hologram {
    /// Image values with shape `(rows, cols)`.
    pub values: Array2<f64>,
    /// Pixel pitch, in the same length unit as the sphere parameters.
    pub spacing: f64,
    /// Illumination wavelength in vacuum.
    pub wavelength: f64,
    /// Refractive index of the surrounding medium.
    pub medium_index: f64,
    /// Illumination polarization `(x, y)`.
    pub illum_polarization: [f64; 2],
}

impl Hologram {
    /// Creates a hologram with x-polarized illumination.
    pub fn new(values: Array2<f64>, spacing: f64, wavelength: f64, medium_index: f64) -> Self {
        Self {
            values,
            spacing,
            wavelength,
            medium_index,
            illum_polarization: [1.0, 0.0],
        }
    }

    /// Overrides the illumination polarization.
    pub fn with_polarization(mut self, polarization: [f64; 2]) -> Self {
        self.illum_polarization = polarization;
        self
    }

    /// Image shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for an empty image.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Image values flattened in row-major order.
    pub fn flattened(&self) -> Array1<f64> {
        flatten(&self.values)
    }

    /// Pixel positions `(x, y)` in row-major order, one row per pixel.
    pub fn pixel_positions(&self) -> Array2<f64> {
        let (rows, cols) = self.shape();
        Array2::from_shape_fn((rows * cols, 2), |(idx, axis)| {
            let pixel = if axis == 0 { idx / cols } else { idx % cols };
            pixel as f64 * self.spacing
        })
    }
}

/// Flattens an image in row-major order regardless of its memory layout.
pub fn flatten(values: &Array2<f64>) -> Array1<f64> {
    values.iter().copied().collect()
}

/// External simulator producing a hologram for a sphere.
pub trait ScatteringCalculator {
    /// Simulates the hologram of `sphere` on the grid of `hologram`, scaled by `scaling`.
    fn calc_holo(&self, hologram: &Hologram, sphere: &Sphere, scaling: f64) -> Result<Array2<f64>>;
}

impl<T: ScatteringCalculator + ?Sized> ScatteringCalculator for &T {
    fn calc_holo(&self, hologram: &Hologram, sphere: &Sphere, scaling: f64) -> Result<Array2<f64>> {
        (**self).calc_holo(hologram, sphere, scaling)
    }
}

impl<T: ScatteringCalculator + ?Sized> ScatteringCalculator for Box<T> {
    fn calc_holo(&self, hologram: &Hologram, sphere: &Sphere, scaling: f64) -> Result<Array2<f64>> {
        (**self).calc_holo(hologram, sphere, scaling)
    }
}

pub(crate) fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> HoloError {
    HoloError::Scattering(
        ErrorInfo::new("calc-shape", "calculator output does not match the hologram grid")
            .with_context("expected", format!("{}x{}", expected.0, expected.1))
            .with_context("actual", format!("{}x{}", actual.0, actual.1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn flatten_is_row_major_for_transposed_views() {
        let values = array![[1.0, 2.0], [3.0, 4.0]];
        let transposed = values.t().to_owned();
        assert_eq!(flatten(&values), array![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(flatten(&transposed), array![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn pixel_positions_follow_spacing() {
        let holo = Hologram::new(Array2::zeros((2, 3)), 0.5, 0.66, 1.33);
        let positions = holo.pixel_positions();
        assert_eq!(positions.dim(), (6, 2));
        assert_eq!(positions.row(4).to_vec(), vec![0.5, 0.5]);
        assert_eq!(positions.row(2).to_vec(), vec![0.0, 1.0]);
    }
}
