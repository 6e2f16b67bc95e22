use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Value recorded at a sample site: a scalar parameter or a flat tensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteValue {
    /// Scalar draw, used for every prior parameter.
    Scalar(f64),
    /// Flattened tensor draw, used for the observation site.
    Tensor(Array1<f64>),
}

impl SiteValue {
    /// Returns the scalar value, if this is a scalar site.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            SiteValue::Scalar(value) => Some(*value),
            SiteValue::Tensor(values) if values.len() == 1 => Some(values[0]),
            SiteValue::Tensor(_) => None,
        }
    }

    /// Returns the tensor value, if this is a tensor site.
    pub fn as_tensor(&self) -> Option<&Array1<f64>> {
        match self {
            SiteValue::Tensor(values) => Some(values),
            SiteValue::Scalar(_) => None,
        }
    }

    /// Number of elements held by the value.
    pub fn len(&self) -> usize {
        match self {
            SiteValue::Scalar(_) => 1,
            SiteValue::Tensor(values) => values.len(),
        }
    }

    /// Returns true for an empty tensor.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the value into an owned tensor, promoting scalars to length one.
    pub fn into_tensor(self) -> Array1<f64> {
        match self {
            SiteValue::Scalar(value) => Array1::from_elem(1, value),
            SiteValue::Tensor(values) => values,
        }
    }
}

impl From<f64> for SiteValue {
    fn from(value: f64) -> Self {
        SiteValue::Scalar(value)
    }
}

impl From<Array1<f64>> for SiteValue {
    fn from(values: Array1<f64>) -> Self {
        SiteValue::Tensor(values)
    }
}
