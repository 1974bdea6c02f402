use rand::Rng;

use crate::models::correlatedwalk::CorrelatedRandomWalk;
use crate::models::randomwalk::GeometricRandomWalk;
use crate::models::stochasticmodel::StochasticModel;

/// Return models the engine can run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnModel {
    Independent(GeometricRandomWalk),
    Correlated(CorrelatedRandomWalk),
}

impl StochasticModel for ReturnModel {
    fn num_assets(&self) -> usize {
        match self {
            ReturnModel::Independent(m) => m.num_assets(),
            ReturnModel::Correlated(m) => m.num_assets(),
        }
    }

    fn gen_daily_returns<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        match self {
            ReturnModel::Independent(m) => m.gen_daily_returns(rng, out),
            ReturnModel::Correlated(m) => m.gen_daily_returns(rng, out),
        }
    }
}
