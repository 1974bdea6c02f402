use chrono::NaiveDate;
use statrs::statistics::Statistics;

use crate::data::pricetable::PriceTable;
use crate::models::distributionparams::DistributionParams;
use crate::utils::errors::{ForecastError, Result};

/// Daily fractional returns of one asset, each tagged with the date of the
/// later close.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    asset: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    pub fn new(asset: impl Into<String>, dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self {
            asset: asset.into(),
            dates,
            values,
        }
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean and sample standard deviation of the daily returns.
    pub fn distribution_params(&self) -> Result<DistributionParams> {
        if self.values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                asset: self.asset.clone(),
                observations: self.values.len(),
            });
        }
        let mean = self.values.iter().mean();
        let std_dev = self.values.iter().std_dev();
        DistributionParams::new(mean, std_dev).map_err(|e| {
            ForecastError::NumericInstability(format!("fitting {}: {}", self.asset, e))
        })
    }
}

/// # ReturnTable
/// Daily returns of every asset of a [`PriceTable`]. A row is kept only when
/// the return is defined for all assets, so every series shares `dates`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnTable {
    dates: Vec<NaiveDate>,
    series: Vec<ReturnSeries>,
}

impl ReturnTable {
    pub fn from_price_table(table: &PriceTable) -> Self {
        let changes: Vec<Vec<Option<f64>>> =
            table.series().iter().map(|s| s.pct_change()).collect();

        let kept: Vec<usize> = (0..table.dates().len())
            .filter(|&row| changes.iter().all(|c| c[row].is_some()))
            .collect();
        let dates: Vec<NaiveDate> = kept.iter().map(|&row| table.dates()[row]).collect();

        let series = table
            .series()
            .iter()
            .zip(&changes)
            .map(|(s, c)| {
                let values = kept.iter().filter_map(|&row| c[row]).collect();
                ReturnSeries::new(s.asset(), dates.clone(), values)
            })
            .collect();

        Self { dates, series }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn series(&self) -> &[ReturnSeries] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, asset: &str) -> Result<&ReturnSeries> {
        self.series
            .iter()
            .find(|s| s.asset() == asset)
            .ok_or_else(|| ForecastError::NotFoundError(format!("returns of {}", asset)))
    }

    /// Fitted parameters in table order.
    pub fn distribution_params(&self) -> Result<Vec<DistributionParams>> {
        self.series.iter().map(|s| s.distribution_params()).collect()
    }

    /// Sample covariance matrix of the daily returns, in table order.
    pub fn covariance_matrix(&self) -> Result<Vec<Vec<f64>>> {
        if self.len() < 2 {
            let asset = self.series.first().map(|s| s.asset()).unwrap_or_default();
            return Err(ForecastError::InsufficientData {
                asset: asset.to_string(),
                observations: self.len(),
            });
        }
        let n = self.series.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..=i {
                let cov = self.series[i]
                    .values()
                    .iter()
                    .covariance(self.series[j].values().iter());
                matrix[i][j] = cov;
                matrix[j][i] = cov;
            }
        }
        Ok(matrix)
    }
}
