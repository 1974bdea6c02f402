use mcforecast::prelude::*;
use serde::Serialize;

/// Serializable result of one CLI run.
#[derive(Debug, Serialize)]
pub struct ForecastReport {
    pub assets: Vec<String>,
    pub weights: Vec<f64>,
    pub investment: f64,
    pub num_simulations: usize,
    pub num_trading_days: usize,
    pub seed: u64,
    pub summary: SummaryTable,
    pub confidence_interval: ConfidenceInterval,
    pub risk_metrics: Vec<RiskMetrics>,
}

impl ForecastReport {
    pub fn new(
        forecast: &Forecast,
        investment: f64,
        risk_metrics: Vec<RiskMetrics>,
    ) -> mcforecast::utils::errors::Result<Self> {
        Ok(Self {
            assets: forecast.assets().to_vec(),
            weights: forecast.weights().as_slice().to_vec(),
            investment,
            num_simulations: forecast.portfolio().num_simulations(),
            num_trading_days: forecast.portfolio().num_trading_days(),
            seed: forecast.seed(),
            summary: *forecast.summary(),
            confidence_interval: forecast.confidence_interval(investment)?,
            risk_metrics,
        })
    }

    pub fn allocation(&self) -> String {
        self.assets
            .iter()
            .zip(&self.weights)
            .map(|(asset, w)| format!("{:.0}% of {}", w * 100.0, asset))
            .collect::<Vec<_>>()
            .join(" & ")
    }

    pub fn years(&self) -> f64 {
        self.num_trading_days as f64 / TRADING_DAYS_PER_YEAR as f64
    }

    /// Forecast horizon in words; short runs are given in trading days.
    pub fn horizon(&self) -> String {
        if self.num_trading_days < TRADING_DAYS_PER_YEAR {
            format!("{} trading days", self.num_trading_days)
        } else {
            format!("{:.1} years", self.years())
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Historical risk/return\n");
        for m in &self.risk_metrics {
            let sharpe = m
                .sharpe_ratio
                .map(|s| format!("{:.3}", s))
                .unwrap_or_else(|| "n/a".to_string());
            let rolling = m
                .rolling_volatility
                .map(|v| format!("{:.2}%", v * 100.0))
                .unwrap_or_else(|| "n/a".to_string());
            out.push_str(&format!(
                "  {:<6} return {:>8.2}%  volatility {:>8.2}%  sharpe {:>7}  cumulative {:>8.2}%  rolling {}d {:>7}\n",
                m.asset,
                m.annualized_return * 100.0,
                m.annualized_volatility * 100.0,
                sharpe,
                m.cumulative_return * 100.0,
                DEFAULT_ROLLING_WINDOW,
                rolling
            ));
        }
        out.push_str(&format!(
            "\nMonte Carlo summary ({} simulations, {} trading days, seed {})\n",
            self.num_simulations, self.num_trading_days, self.seed
        ));
        out.push_str(&self.summary.to_string());
        out.push_str(&format!(
            "\nThere is a 95% chance that the current portfolio ({}) value of ${:.2} over the next {} will end within the range of ${:.2} and ${:.2}.\n",
            self.allocation(),
            self.investment,
            self.horizon(),
            self.confidence_interval.lower,
            self.confidence_interval.upper
        ));
        out
    }
}
