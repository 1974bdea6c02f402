use serde::{Deserialize, Serialize};

use crate::utils::errors::{ForecastError, Result};

pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// # DistributionParams
/// Mean and standard deviation of an asset's daily return, in daily units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    mean: f64,
    std_dev: f64,
}

impl DistributionParams {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() || !std_dev.is_finite() {
            return Err(ForecastError::NumericInstability(format!(
                "non-finite distribution parameters (mean {}, std dev {})",
                mean, std_dev
            )));
        }
        if std_dev < 0.0 {
            return Err(ForecastError::invalid_parameter(
                "std_dev",
                format!("{} is negative", std_dev),
            ));
        }
        Ok(Self { mean, std_dev })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn annualized_mean(&self) -> f64 {
        self.mean * TRADING_DAYS_PER_YEAR as f64
    }

    pub fn annualized_volatility(&self) -> f64 {
        self.std_dev * (TRADING_DAYS_PER_YEAR as f64).sqrt()
    }
}
