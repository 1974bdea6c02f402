use std::collections::HashSet;

use chrono::NaiveDate;

use crate::data::priceseries::PriceSeries;
use crate::data::returnseries::ReturnTable;
use crate::utils::errors::{ForecastError, Result};

/// # PriceTable
/// Price histories of several assets sharing one date axis. The axis is the
/// date index of the first series; every other series must match it exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    series: Vec<PriceSeries>,
}

impl PriceTable {
    pub fn new(series: Vec<PriceSeries>) -> Result<Self> {
        let first = series.first().ok_or_else(|| {
            ForecastError::invalid_parameter("prices", "at least one price series is required")
        })?;
        let dates: Vec<NaiveDate> = first.dates().collect();

        let mut seen = HashSet::new();
        for s in series.iter() {
            if !seen.insert(s.asset()) {
                return Err(ForecastError::invalid_parameter(
                    "prices",
                    format!("duplicate asset {}", s.asset()),
                ));
            }
            if s.len() != dates.len() {
                return Err(ForecastError::misaligned(
                    s.asset(),
                    format!(
                        "{} observations, expected {} from {}",
                        s.len(),
                        dates.len(),
                        first.asset()
                    ),
                ));
            }
            if let Some((date, expected)) = s.dates().zip(&dates).find(|(d, e)| d != *e) {
                return Err(ForecastError::misaligned(
                    s.asset(),
                    format!("date {} does not match {} in {}", date, expected, first.asset()),
                ));
            }
        }

        Ok(Self { dates, series })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn series(&self) -> &[PriceSeries] {
        &self.series
    }

    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.asset())
    }

    pub fn num_assets(&self) -> usize {
        self.series.len()
    }

    pub fn get(&self, asset: &str) -> Result<&PriceSeries> {
        self.series
            .iter()
            .find(|s| s.asset() == asset)
            .ok_or_else(|| ForecastError::NotFoundError(format!("asset {}", asset)))
    }

    /// Last known real close of `asset`, the day 0 value of every simulated path.
    pub fn anchor_price(&self, asset: &str) -> Result<f64> {
        self.get(asset)?
            .last_close()
            .ok_or_else(|| ForecastError::InsufficientData {
                asset: asset.to_string(),
                observations: 0,
            })
    }

    /// Sub-table with the given assets in the given order, e.g. to leave a
    /// benchmark series out of the simulation.
    pub fn select(&self, assets: &[&str]) -> Result<PriceTable> {
        let series = assets
            .iter()
            .map(|a| self.get(a).cloned())
            .collect::<Result<Vec<_>>>()?;
        PriceTable::new(series)
    }

    pub fn daily_returns(&self) -> ReturnTable {
        ReturnTable::from_price_table(self)
    }
}
