use crate::data::{pricetable::PriceTable, weights::Weights};
use crate::models::assetmodel::fit_asset_models;
use crate::simulation::{
    config::{CorrelationMode, SimulationConfig},
    montecarloengine::MonteCarloEngine,
    pathset::{PortfolioPathSet, SimulationPathSet},
    summary::{ConfidenceInterval, SummaryTable},
};
use crate::utils::errors::Result;

/// Outcome of one Monte Carlo run.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    seed: u64,
    assets: Vec<String>,
    weights: Weights,
    portfolio: PortfolioPathSet,
    summary: SummaryTable,
    asset_paths: Option<SimulationPathSet>,
}

impl Forecast {
    pub(crate) fn new(
        seed: u64,
        assets: Vec<String>,
        weights: Weights,
        portfolio: PortfolioPathSet,
        summary: SummaryTable,
        asset_paths: Option<SimulationPathSet>,
    ) -> Self {
        Self {
            seed,
            assets,
            weights,
            portfolio,
            summary,
            asset_paths,
        }
    }

    /// Master seed of the run; passing it back reproduces the same paths.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn portfolio(&self) -> &PortfolioPathSet {
        &self.portfolio
    }

    pub fn summary(&self) -> &SummaryTable {
        &self.summary
    }

    /// Simulated prices per asset, kept only with `retain_asset_paths`.
    pub fn asset_paths(&self) -> Option<&SimulationPathSet> {
        self.asset_paths.as_ref()
    }

    pub fn terminal_distribution(&self) -> Vec<f64> {
        self.portfolio.terminal()
    }

    pub fn confidence_interval(&self, investment: f64) -> Result<ConfidenceInterval> {
        self.summary.confidence_interval(investment)
    }
}

/// Fits the selected assets of `prices` and simulates their weighted
/// portfolio. Assets not listed, such as a benchmark, take no part.
pub fn forecast_portfolio(
    prices: &PriceTable,
    assets: &[&str],
    weights: &Weights,
    config: &SimulationConfig,
) -> Result<Forecast> {
    config.validate()?;
    let selected = prices.select(assets)?;
    let models = fit_asset_models(&selected)?;
    let covariance = match config.correlation {
        CorrelationMode::Correlated => Some(selected.daily_returns().covariance_matrix()?),
        CorrelationMode::Independent => None,
    };

    let mut engine = MonteCarloEngine::new(&models, weights).with_config(config.clone());
    if let Some(covariance) = &covariance {
        engine = engine.with_covariance(covariance);
    }
    engine.run()
}
