use serde::{Deserialize, Serialize};

use crate::models::distributionparams::TRADING_DAYS_PER_YEAR;
use crate::utils::errors::{ForecastError, Result};

pub const DEFAULT_NUM_SIMULATIONS: usize = 500;
pub const DEFAULT_NUM_TRADING_DAYS: usize = TRADING_DAYS_PER_YEAR * 3;

/// How daily returns of different assets relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMode {
    /// Independent draws per asset.
    #[default]
    Independent,
    /// Joint normal draws using the historical covariance.
    Correlated,
}

/// # SimulationConfig
/// Run parameters of the Monte Carlo engine. Missing fields in a JSON
/// config take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub num_simulations: usize,
    pub num_trading_days: usize,
    pub seed: Option<u64>,
    pub correlation: CorrelationMode,
    pub parallel: bool,
    pub num_threads: Option<usize>,
    pub retain_asset_paths: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            num_trading_days: DEFAULT_NUM_TRADING_DAYS,
            seed: None,
            correlation: CorrelationMode::Independent,
            parallel: true,
            num_threads: None,
            retain_asset_paths: false,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_num_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    pub fn with_num_trading_days(mut self, num_trading_days: usize) -> Self {
        self.num_trading_days = num_trading_days;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_correlation(mut self, correlation: CorrelationMode) -> Self {
        self.correlation = correlation;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_retained_asset_paths(mut self, retain: bool) -> Self {
        self.retain_asset_paths = retain;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_simulations < 1 {
            return Err(ForecastError::invalid_parameter(
                "num_simulations",
                "must be at least 1",
            ));
        }
        if self.num_trading_days < 1 {
            return Err(ForecastError::invalid_parameter(
                "num_trading_days",
                "must be at least 1",
            ));
        }
        if self.num_threads == Some(0) {
            return Err(ForecastError::invalid_parameter(
                "num_threads",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
