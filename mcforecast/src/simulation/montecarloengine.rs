use rand::Rng;
use rayon::{
    iter::{IntoParallelIterator, ParallelIterator},
    ThreadPoolBuilder,
};
use tracing::{debug, info, warn};

use crate::data::weights::Weights;
use crate::models::{
    assetmodel::AssetModel, correlatedwalk::CorrelatedRandomWalk, model::ReturnModel,
    randomnumbers::RandomStreams, randomwalk::GeometricRandomWalk,
    stochasticmodel::StochasticModel,
};
use crate::simulation::{
    config::{CorrelationMode, SimulationConfig},
    forecast::Forecast,
    pathset::{PortfolioPathSet, SimulationPathSet},
    summary::SummaryTable,
};
use crate::utils::errors::{ForecastError, Result};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// # MonteCarloEngine
/// Simulates geometric random walks for every asset, starting at the anchor
/// prices, and combines them into weighted portfolio growth factors.
///
/// Simulations are independent of each other and run on a rayon pool when
/// `parallel` is set. Simulation `i` always draws from its own generator
/// derived from the master seed, so a seeded run gives the same paths
/// whether it runs sequentially or on any number of threads.
pub struct MonteCarloEngine<'a> {
    assets: &'a [AssetModel],
    weights: &'a Weights,
    covariance: Option<&'a [Vec<f64>]>,
    config: SimulationConfig,
}

struct SimulatedPath {
    ratios: Vec<f64>,
    prices: Option<Vec<f64>>,
}

/// Read-only state shared by every simulation of a run.
struct PathSimulator<'a, M: StochasticModel> {
    model: &'a M,
    assets: &'a [AssetModel],
    anchors: Vec<f64>,
    weights: &'a [f64],
    num_trading_days: usize,
    retain_prices: bool,
}

impl<M: StochasticModel> PathSimulator<'_, M> {
    fn growth_factor(&self, prices: &[f64]) -> f64 {
        prices
            .iter()
            .zip(&self.anchors)
            .zip(self.weights)
            .map(|((price, anchor), weight)| weight * (price / anchor))
            .sum()
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        simulation: usize,
        rng: &mut R,
        draws: &mut [f64],
    ) -> Result<SimulatedPath> {
        let n_assets = self.anchors.len();
        let mut prices = self.anchors.clone();
        let mut ratios = Vec::with_capacity(self.num_trading_days + 1);
        let mut retained = self
            .retain_prices
            .then(|| Vec::with_capacity((self.num_trading_days + 1) * n_assets));

        ratios.push(self.growth_factor(&prices));
        if let Some(path) = retained.as_mut() {
            path.extend_from_slice(&prices);
        }

        for day in 1..=self.num_trading_days {
            self.model.gen_daily_returns(rng, draws);
            for (a, (price, ret)) in prices.iter_mut().zip(draws.iter()).enumerate() {
                *price *= 1.0 + ret;
                if !price.is_finite() {
                    return Err(ForecastError::NumericInstability(format!(
                        "price of {} became {} in simulation {} on day {}",
                        self.assets[a].asset(),
                        price,
                        simulation,
                        day
                    )));
                }
            }
            let ratio = self.growth_factor(&prices);
            if !ratio.is_finite() {
                return Err(ForecastError::NumericInstability(format!(
                    "portfolio growth factor became {} in simulation {} on day {}",
                    ratio, simulation, day
                )));
            }
            ratios.push(ratio);
            if let Some(path) = retained.as_mut() {
                path.extend_from_slice(&prices);
            }
        }

        Ok(SimulatedPath {
            ratios,
            prices: retained,
        })
    }
}

impl<'a> MonteCarloEngine<'a> {
    pub fn new(assets: &'a [AssetModel], weights: &'a Weights) -> Self {
        Self {
            assets,
            weights,
            covariance: None,
            config: SimulationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Covariance of daily returns, in asset order. Required for
    /// [`CorrelationMode::Correlated`].
    pub fn with_covariance(mut self, covariance: &'a [Vec<f64>]) -> Self {
        self.covariance = Some(covariance);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.assets.is_empty() {
            return Err(ForecastError::invalid_parameter(
                "assets",
                "at least one asset is required",
            ));
        }
        if self.weights.len() != self.assets.len() {
            return Err(ForecastError::invalid_parameter(
                "weights",
                format!(
                    "{} weights for {} assets",
                    self.weights.len(),
                    self.assets.len()
                ),
            ));
        }
        let total = self.weights.sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(total, "weights do not sum to 1.0, using them as given");
        }
        Ok(())
    }

    fn build_model(&self) -> Result<ReturnModel> {
        let params = self.assets.iter().map(|a| a.params()).collect::<Vec<_>>();
        match self.config.correlation {
            CorrelationMode::Independent => {
                Ok(ReturnModel::Independent(GeometricRandomWalk::new(params)))
            }
            CorrelationMode::Correlated => {
                let covariance = self.covariance.ok_or_else(|| {
                    ForecastError::invalid_parameter(
                        "covariance",
                        "required for correlated draws",
                    )
                })?;
                Ok(ReturnModel::Correlated(CorrelatedRandomWalk::new(
                    &params, covariance,
                )?))
            }
        }
    }

    pub fn run(&self) -> Result<Forecast> {
        self.validate()?;
        let model = self.build_model()?;

        let streams = match self.config.seed {
            Some(seed) => RandomStreams::new(seed),
            None => RandomStreams::from_entropy(),
        };
        let n_simulations = self.config.num_simulations;
        let n_assets = self.assets.len();

        info!(
            assets = n_assets,
            simulations = n_simulations,
            trading_days = self.config.num_trading_days,
            seed = streams.master_seed(),
            correlation = ?self.config.correlation,
            parallel = self.config.parallel,
            "starting monte carlo simulation"
        );

        let simulator = PathSimulator {
            model: &model,
            assets: self.assets,
            anchors: self.assets.iter().map(|a| a.anchor_price()).collect(),
            weights: self.weights.as_slice(),
            num_trading_days: self.config.num_trading_days,
            retain_prices: self.config.retain_asset_paths,
        };

        let paths = if self.config.parallel {
            let mut builder =
                ThreadPoolBuilder::new().thread_name(|i| format!("mcforecast-thread-{}", i));
            if let Some(threads) = self.config.num_threads {
                builder = builder.num_threads(threads);
            }
            let pool = builder.build()?;
            debug!(threads = pool.current_num_threads(), "built simulation pool");
            pool.install(|| {
                (0..n_simulations)
                    .into_par_iter()
                    .map_init(
                        || vec![0.0; n_assets],
                        |draws, s| simulator.simulate(s, &mut streams.stream(s), draws),
                    )
                    .collect::<Result<Vec<_>>>()
            })?
        } else {
            let mut draws = vec![0.0; n_assets];
            (0..n_simulations)
                .map(|s| simulator.simulate(s, &mut streams.stream(s), &mut draws))
                .collect::<Result<Vec<_>>>()?
        };

        let (ratios, prices): (Vec<_>, Vec<_>) =
            paths.into_iter().map(|p| (p.ratios, p.prices)).unzip();
        let portfolio = PortfolioPathSet::from_paths(ratios);
        let asset_paths = if self.config.retain_asset_paths {
            let names = self.assets.iter().map(|a| a.asset().to_string()).collect();
            Some(SimulationPathSet::from_paths(
                names,
                prices.into_iter().flatten().collect(),
            ))
        } else {
            None
        };

        let summary = SummaryTable::from_values(&portfolio.terminal())?;
        info!(
            mean = summary.mean,
            p5 = summary.p5,
            p95 = summary.p95,
            "monte carlo simulation finished"
        );

        Ok(Forecast::new(
            streams.master_seed(),
            self.assets.iter().map(|a| a.asset().to_string()).collect(),
            self.weights.clone(),
            portfolio,
            summary,
            asset_paths,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::distributionparams::DistributionParams;

    fn assets(params: &[(f64, f64, f64)]) -> Vec<AssetModel> {
        params
            .iter()
            .enumerate()
            .map(|(i, (mean, std_dev, anchor))| {
                AssetModel::new(
                    format!("ASSET{}", i),
                    DistributionParams::new(*mean, *std_dev).unwrap(),
                    *anchor,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_flat_paths_for_constant_prices() -> Result<()> {
        let assets = assets(&[(0.0, 0.0, 100.0), (0.0, 0.0, 50.0)]);
        let weights = Weights::new(vec![0.6, 0.4])?;
        let config = SimulationConfig::new()
            .with_num_simulations(20)
            .with_num_trading_days(30)
            .with_seed(3)
            .with_retained_asset_paths(true);
        let forecast = MonteCarloEngine::new(&assets, &weights)
            .with_config(config)
            .run()?;
        let expected_ratio = 0.6 + 0.4;
        for path in forecast.portfolio().simulations() {
            assert!(path.iter().all(|r| *r == expected_ratio));
        }
        let prices = forecast.asset_paths().unwrap();
        for s in 0..20 {
            assert!(prices.asset_path(s, 0).unwrap().iter().all(|p| *p == 100.0));
            assert!(prices.asset_path(s, 1).unwrap().iter().all(|p| *p == 50.0));
        }
        Ok(())
    }

    #[test]
    fn test_deterministic_drift_compounds() -> Result<()> {
        let assets = assets(&[(0.01, 0.0, 10.0)]);
        let weights = Weights::new(vec![1.0])?;
        let config = SimulationConfig::new()
            .with_num_simulations(3)
            .with_num_trading_days(5)
            .with_parallel(false);
        let forecast = MonteCarloEngine::new(&assets, &weights)
            .with_config(config)
            .run()?;
        let expected = 1.01f64.powi(5);
        for value in forecast.terminal_distribution() {
            assert!((value - expected).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_parallel_matches_sequential() -> Result<()> {
        let assets = assets(&[(0.0005, 0.01, 100.0), (0.0003, 0.008, 50.0)]);
        let weights = Weights::new(vec![0.6, 0.4])?;
        let config = SimulationConfig::new()
            .with_num_simulations(64)
            .with_num_trading_days(40)
            .with_seed(2024);
        let sequential = MonteCarloEngine::new(&assets, &weights)
            .with_config(config.clone().with_parallel(false))
            .run()?;
        let parallel = MonteCarloEngine::new(&assets, &weights)
            .with_config(config.with_num_threads(4))
            .run()?;
        assert_eq!(sequential.portfolio(), parallel.portfolio());
        assert_eq!(sequential.seed(), 2024);
        Ok(())
    }

    #[test]
    fn test_weight_count_must_match_assets() -> Result<()> {
        let assets = assets(&[(0.0, 0.01, 100.0), (0.0, 0.01, 50.0)]);
        let weights = Weights::new(vec![1.0])?;
        let result = MonteCarloEngine::new(&assets, &weights).run();
        match result {
            Err(ForecastError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "weights")
            }
            other => panic!("expected InvalidParameter, got {:?}", other.map(|_| ())),
        }
        Ok(())
    }

    #[test]
    fn test_correlated_mode_requires_covariance() -> Result<()> {
        let assets = assets(&[(0.0, 0.01, 100.0)]);
        let weights = Weights::new(vec![1.0])?;
        let config = SimulationConfig::new().with_correlation(CorrelationMode::Correlated);
        let result = MonteCarloEngine::new(&assets, &weights)
            .with_config(config)
            .run();
        assert!(matches!(result, Err(ForecastError::InvalidParameter { .. })));
        Ok(())
    }

    #[test]
    fn test_exploding_volatility_is_reported() -> Result<()> {
        let assets = assets(&[(0.0, 1e300, 100.0)]);
        let weights = Weights::new(vec![1.0])?;
        let config = SimulationConfig::new()
            .with_num_simulations(4)
            .with_num_trading_days(50)
            .with_seed(1);
        let result = MonteCarloEngine::new(&assets, &weights)
            .with_config(config)
            .run();
        assert!(matches!(result, Err(ForecastError::NumericInstability(_))));
        Ok(())
    }
}
