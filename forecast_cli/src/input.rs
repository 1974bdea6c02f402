use std::{fs, path::Path};

use mcforecast::prelude::*;
use serde::Deserialize;

use crate::errors::Result;

#[derive(Debug, Deserialize)]
pub struct SeriesInput {
    pub asset: String,
    pub prices: Vec<PricePoint>,
}

/// Price history file: `{ "series": [ { "asset": ..., "prices": [...] } ] }`.
#[derive(Debug, Deserialize)]
pub struct PriceFile {
    pub series: Vec<SeriesInput>,
}

impl PriceFile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn into_price_table(self) -> Result<PriceTable> {
        let series = self
            .series
            .into_iter()
            .map(|s| PriceSeries::new(s.asset, s.prices))
            .collect::<mcforecast::utils::errors::Result<Vec<_>>>()?;
        Ok(PriceTable::new(series)?)
    }
}

pub fn read_config(path: &Path) -> Result<SimulationConfig> {
    Ok(SimulationConfig::from_json(&fs::read_to_string(path)?)?)
}
