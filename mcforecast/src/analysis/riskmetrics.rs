use serde::Serialize;

use crate::data::returnseries::{ReturnSeries, ReturnTable};
use crate::math::statistics::rolling_std;
use crate::utils::errors::Result;

pub const DEFAULT_ROLLING_WINDOW: usize = 21;
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = -0.25;

/// # RiskMetrics
/// Annualized historical risk and return of one asset. The Sharpe ratio
/// assumes a zero risk-free rate and is `None` for an asset with no
/// volatility. `rolling_volatility` is the latest trailing 21-day standard
/// deviation of the daily returns with crash days below -25% left out, and
/// is `None` when fewer than 21 such days exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    pub asset: String,
    pub observations: usize,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: Option<f64>,
    pub cumulative_return: f64,
    pub rolling_volatility: Option<f64>,
}

impl RiskMetrics {
    pub fn from_returns(returns: &ReturnSeries) -> Result<Self> {
        let params = returns.distribution_params()?;
        let annualized_return = params.annualized_mean();
        let annualized_volatility = params.annualized_volatility();
        let sharpe_ratio =
            (annualized_volatility > 0.0).then(|| annualized_return / annualized_volatility);
        let cumulative_return = cumulative_returns(returns.values())
            .last()
            .copied()
            .unwrap_or(0.0);
        let filtered = filter_outliers(returns, DEFAULT_OUTLIER_THRESHOLD);
        let rolling_volatility = rolling_volatility(&filtered, DEFAULT_ROLLING_WINDOW)?
            .last()
            .copied()
            .flatten();
        Ok(Self {
            asset: returns.asset().to_string(),
            observations: returns.len(),
            annualized_return,
            annualized_volatility,
            sharpe_ratio,
            cumulative_return,
            rolling_volatility,
        })
    }
}

/// Risk metrics of every asset of the table, benchmark included.
pub fn analyze(returns: &ReturnTable) -> Result<Vec<RiskMetrics>> {
    returns.series().iter().map(RiskMetrics::from_returns).collect()
}

/// Running `(1 + r).cumprod() - 1`.
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |growth, r| {
            *growth *= 1.0 + r;
            Some(*growth - 1.0)
        })
        .collect()
}

/// Trailing sample standard deviation of daily returns over `window` days.
pub fn rolling_volatility(returns: &ReturnSeries, window: usize) -> Result<Vec<Option<f64>>> {
    rolling_std(returns.values(), window)
}

/// Keeps only returns strictly above `threshold`, e.g. to look at a
/// distribution without crash days.
pub fn filter_outliers(returns: &ReturnSeries, threshold: f64) -> ReturnSeries {
    let (dates, values) = returns
        .dates()
        .iter()
        .zip(returns.values())
        .filter(|(_, r)| **r > threshold)
        .map(|(d, r)| (*d, *r))
        .unzip();
    ReturnSeries::new(returns.asset(), dates, values)
}
