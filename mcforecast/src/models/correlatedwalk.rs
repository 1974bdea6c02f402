use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::math::cholesky::cholesky;
use crate::models::distributionparams::DistributionParams;
use crate::models::stochasticmodel::StochasticModel;
use crate::utils::errors::{ForecastError, Result};

/// # CorrelatedRandomWalk
/// Joint normal daily returns `mean + L * z`, where `L` is the Cholesky
/// factor of the historical covariance matrix and `z` is a vector of
/// independent standard normals.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedRandomWalk {
    means: Vec<f64>,
    factor: Vec<Vec<f64>>,
}

impl CorrelatedRandomWalk {
    pub fn new(params: &[DistributionParams], covariance: &[Vec<f64>]) -> Result<Self> {
        if covariance.len() != params.len() {
            return Err(ForecastError::invalid_parameter(
                "covariance",
                format!(
                    "{}x{} matrix for {} assets",
                    covariance.len(),
                    covariance.len(),
                    params.len()
                ),
            ));
        }
        let factor = cholesky(covariance)?;
        debug!(assets = params.len(), "factored return covariance");
        Ok(Self {
            means: params.iter().map(|p| p.mean()).collect(),
            factor,
        })
    }

    pub fn factor(&self) -> &[Vec<f64>] {
        &self.factor
    }
}

impl StochasticModel for CorrelatedRandomWalk {
    fn num_assets(&self) -> usize {
        self.means.len()
    }

    fn gen_daily_returns<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = rng.sample(StandardNormal);
        }
        // lower triangular product in place, bottom row first
        for i in (0..self.means.len()).rev() {
            let shock: f64 = (0..=i).map(|j| self.factor[i][j] * out[j]).sum();
            out[i] = self.means[i] + shock;
        }
    }
}
