use rand::Rng;
use rand_distr::StandardNormal;

use crate::models::distributionparams::DistributionParams;
use crate::models::stochasticmodel::StochasticModel;

/// # GeometricRandomWalk
/// Each asset's daily return is an independent draw from
/// `Normal(mean, std_dev)`. No cross-asset correlation is modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricRandomWalk {
    params: Vec<DistributionParams>,
}

impl GeometricRandomWalk {
    pub fn new(params: Vec<DistributionParams>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &[DistributionParams] {
        &self.params
    }
}

impl StochasticModel for GeometricRandomWalk {
    fn num_assets(&self) -> usize {
        self.params.len()
    }

    fn gen_daily_returns<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        for (slot, p) in out.iter_mut().zip(&self.params) {
            let z: f64 = rng.sample(StandardNormal);
            *slot = p.mean() + p.std_dev() * z;
        }
    }
}
