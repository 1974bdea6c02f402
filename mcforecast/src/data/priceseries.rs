use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::returnseries::ReturnSeries;
use crate::utils::errors::{ForecastError, Result};

/// A single daily close. A `None` close marks a missing observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self { date, close: None }
    }
}

/// # PriceSeries
/// Ordered daily closes of one asset. Dates are strictly increasing and every
/// present close is positive and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    asset: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(asset: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let asset = asset.into();
        for window in points.windows(2) {
            if window[1].date <= window[0].date {
                return Err(ForecastError::invalid_parameter(
                    format!("prices.{}", asset),
                    format!(
                        "dates must be strictly increasing, found {} after {}",
                        window[1].date, window[0].date
                    ),
                ));
            }
        }
        if let Some(bad) = points
            .iter()
            .find(|p| matches!(p.close, Some(c) if !(c.is_finite() && c > 0.0)))
        {
            return Err(ForecastError::invalid_parameter(
                format!("prices.{}", asset),
                format!("close on {} must be positive and finite", bad.date),
            ));
        }
        Ok(Self { asset, points })
    }

    /// Builds a series with no missing closes.
    pub fn from_closes(
        asset: impl Into<String>,
        closes: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self> {
        let points = closes
            .into_iter()
            .map(|(date, close)| PricePoint::new(date, close))
            .collect();
        Self::new(asset, points)
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Last known close, skipping trailing missing observations.
    pub fn last_close(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.close)
    }

    /// Percentage change per row; `None` at t = 0 and wherever either close
    /// is missing.
    pub fn pct_change(&self) -> Vec<Option<f64>> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let mut changes = Vec::with_capacity(self.points.len());
        changes.push(None);
        for window in self.points.windows(2) {
            let change = match (window[0].close, window[1].close) {
                (Some(prev), Some(curr)) => Some((curr - prev) / prev),
                _ => None,
            };
            changes.push(change);
        }
        changes
    }

    /// Daily returns of this series alone, undefined rows dropped.
    pub fn daily_returns(&self) -> ReturnSeries {
        let (dates, values) = self
            .points
            .iter()
            .zip(self.pct_change())
            .filter_map(|(p, r)| r.map(|r| (p.date, r)))
            .unzip();
        ReturnSeries::new(self.asset.clone(), dates, values)
    }
}
