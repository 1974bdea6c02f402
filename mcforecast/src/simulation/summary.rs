use std::fmt;

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::math::statistics::{quantile_sorted, sorted};
use crate::utils::errors::{ForecastError, Result};

/// Display order of the summary statistics.
pub const SUMMARY_LABELS: [&str; 10] = [
    "count", "mean", "std", "min", "25%", "50%", "75%", "max", "5%", "95%",
];

/// # SummaryTable
/// Descriptive statistics of a distribution of growth factors. Entries are
/// looked up by label, never by position. `std` is the sample standard
/// deviation and is NaN for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTable {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
    #[serde(rename = "5%")]
    pub p5: f64,
    #[serde(rename = "95%")]
    pub p95: f64,
}

impl SummaryTable {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::invalid_parameter(
                "values",
                "cannot summarize an empty distribution",
            ));
        }
        let data = sorted(values);
        Ok(Self {
            count: data.len(),
            mean: data.iter().mean(),
            std: data.iter().std_dev(),
            min: data[0],
            p25: quantile_sorted(&data, 0.25)?,
            p50: quantile_sorted(&data, 0.50)?,
            p75: quantile_sorted(&data, 0.75)?,
            max: data[data.len() - 1],
            p5: quantile_sorted(&data, 0.05)?,
            p95: quantile_sorted(&data, 0.95)?,
        })
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        let value = match label {
            "count" => self.count as f64,
            "mean" => self.mean,
            "std" => self.std,
            "min" => self.min,
            "25%" => self.p25,
            "50%" => self.p50,
            "75%" => self.p75,
            "max" => self.max,
            "5%" => self.p5,
            "95%" => self.p95,
            _ => return None,
        };
        Some(value)
    }

    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        SUMMARY_LABELS
            .iter()
            .filter_map(|label| self.get(label).map(|v| (*label, v)))
            .collect()
    }

    /// Dollar range between the 5% and 95% growth factors for `investment`.
    pub fn confidence_interval(&self, investment: f64) -> Result<ConfidenceInterval> {
        ConfidenceInterval::new(self, investment)
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.entries() {
            if label == "count" {
                writeln!(f, "{:<6} {:>14}", label, self.count)?;
            } else {
                writeln!(f, "{:<6} {:>14.6}", label, value)?;
            }
        }
        Ok(())
    }
}

/// Lower and upper dollar bounds of the 90% central range of outcomes
/// (5% and 95% growth factors times the invested amount).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub investment: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn new(summary: &SummaryTable, investment: f64) -> Result<Self> {
        if !(investment.is_finite() && investment >= 0.0) {
            return Err(ForecastError::invalid_parameter(
                "investment",
                format!("{} must be non-negative and finite", investment),
            ));
        }
        let lower = summary.get("5%").map(|q| q * investment);
        let upper = summary.get("95%").map(|q| q * investment);
        match (lower, upper) {
            (Some(lower), Some(upper)) => Ok(Self {
                investment,
                lower,
                upper,
            }),
            _ => Err(ForecastError::NotFoundError(
                "5% and 95% summary entries".to_string(),
            )),
        }
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2} to ${:.2}", self.lower, self.upper)
    }
}
