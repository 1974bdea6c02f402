use serde::{Deserialize, Serialize};

use crate::utils::errors::{ForecastError, Result};

/// Fractional portfolio weights, one per simulated asset. The sum is not
/// required to be 1.0 and weights are never normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights(Vec<f64>);

impl Weights {
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(ForecastError::invalid_parameter(
                "weights",
                "at least one weight is required",
            ));
        }
        if let Some((i, w)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(ForecastError::invalid_parameter(
                format!("weights[{}]", i),
                format!("{} is not finite", w),
            ));
        }
        Ok(Self(weights))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = ForecastError;

    fn try_from(weights: Vec<f64>) -> Result<Self> {
        Weights::new(weights)
    }
}
