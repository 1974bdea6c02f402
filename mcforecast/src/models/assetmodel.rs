use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::pricetable::PriceTable;
use crate::models::distributionparams::DistributionParams;
use crate::utils::errors::{ForecastError, Result};

/// A simulated asset: its fitted return distribution and the anchor price
/// every path starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetModel {
    asset: String,
    params: DistributionParams,
    anchor_price: f64,
}

impl AssetModel {
    pub fn new(
        asset: impl Into<String>,
        params: DistributionParams,
        anchor_price: f64,
    ) -> Result<Self> {
        let asset = asset.into();
        if !(anchor_price.is_finite() && anchor_price > 0.0) {
            return Err(ForecastError::invalid_parameter(
                format!("anchor_price.{}", asset),
                format!("{} must be positive and finite", anchor_price),
            ));
        }
        Ok(Self {
            asset,
            params,
            anchor_price,
        })
    }

    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn params(&self) -> DistributionParams {
        self.params
    }

    pub fn anchor_price(&self) -> f64 {
        self.anchor_price
    }
}

/// Fits one [`AssetModel`] per column of `prices`, in table order.
pub fn fit_asset_models(prices: &PriceTable) -> Result<Vec<AssetModel>> {
    let returns = prices.daily_returns();
    returns
        .series()
        .iter()
        .map(|series| {
            let params = series.distribution_params()?;
            let anchor = prices.anchor_price(series.asset())?;
            debug!(
                asset = series.asset(),
                mean = params.mean(),
                std_dev = params.std_dev(),
                anchor,
                observations = series.len(),
                "fitted return distribution"
            );
            AssetModel::new(series.asset(), params, anchor)
        })
        .collect()
}
