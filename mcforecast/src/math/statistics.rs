use statrs::statistics::Statistics;

use crate::utils::errors::{ForecastError, Result};

/// Sorted copy of `values`, ascending by total order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile `q` in `[0, 1]` of already sorted data, interpolating linearly
/// between the order statistics at `floor(h)` and `ceil(h)` with
/// `h = (n - 1) * q`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(ForecastError::invalid_parameter(
            "values",
            "quantile of an empty sample",
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(ForecastError::invalid_parameter(
            "quantile",
            format!("{} is outside [0, 1]", q),
        ));
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    let fraction = h - lower as f64;
    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Sample standard deviation over a trailing window. Entries before the
/// first full window are `None`.
pub fn rolling_std(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window < 2 {
        return Err(ForecastError::invalid_parameter(
            "window",
            format!("{} is too small for a sample standard deviation", window),
        ));
    }
    let rolled = (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                Some(values[i + 1 - window..=i].iter().std_dev())
            }
        })
        .collect();
    Ok(rolled)
}
