/// # PortfolioPathSet
/// Weighted growth factor of the portfolio, `(trading_days + 1) x
/// num_simulations`. Row 0 is the anchor day. Values are stored one
/// simulation after another.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPathSet {
    num_rows: usize,
    num_simulations: usize,
    values: Vec<f64>,
}

impl PortfolioPathSet {
    /// Builds the set from one path per simulation; all paths share a length.
    pub(crate) fn from_paths(paths: Vec<Vec<f64>>) -> Self {
        let num_simulations = paths.len();
        let num_rows = paths.first().map(|p| p.len()).unwrap_or(0);
        debug_assert!(paths.iter().all(|p| p.len() == num_rows));
        Self {
            num_rows,
            num_simulations,
            values: paths.into_iter().flatten().collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_trading_days(&self) -> usize {
        self.num_rows.saturating_sub(1)
    }

    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    pub fn get(&self, day: usize, simulation: usize) -> Option<f64> {
        if day >= self.num_rows || simulation >= self.num_simulations {
            return None;
        }
        Some(self.values[simulation * self.num_rows + day])
    }

    /// Full path of one simulation, day 0 first.
    pub fn simulation(&self, simulation: usize) -> Option<&[f64]> {
        if simulation >= self.num_simulations {
            return None;
        }
        let start = simulation * self.num_rows;
        Some(&self.values[start..start + self.num_rows])
    }

    pub fn simulations(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.num_rows.max(1))
    }

    /// Growth factors of every simulation on `day`.
    pub fn day(&self, day: usize) -> Option<Vec<f64>> {
        if day >= self.num_rows {
            return None;
        }
        Some(self.simulations().map(|path| path[day]).collect())
    }

    /// Terminal distribution: growth factors on the last simulated day.
    pub fn terminal(&self) -> Vec<f64> {
        self.day(self.num_trading_days()).unwrap_or_default()
    }

    /// Cumulative returns (growth factor minus one) on `day`.
    pub fn cumulative_returns(&self, day: usize) -> Option<Vec<f64>> {
        self.day(day)
            .map(|row| row.into_iter().map(|ratio| ratio - 1.0).collect())
    }

    /// Day-major copy of the matrix, one row per day.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.num_rows)
            .filter_map(|day| self.day(day))
            .collect()
    }
}

/// # SimulationPathSet
/// Simulated price levels, `(trading_days + 1) x num_simulations x
/// num_assets`. Row 0 holds the anchor prices.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPathSet {
    assets: Vec<String>,
    num_rows: usize,
    num_simulations: usize,
    values: Vec<f64>,
}

impl SimulationPathSet {
    /// `paths[s]` holds the prices of simulation `s`, day by day, all assets
    /// of a day next to each other.
    pub(crate) fn from_paths(assets: Vec<String>, paths: Vec<Vec<f64>>) -> Self {
        let num_simulations = paths.len();
        let num_rows = paths
            .first()
            .map(|p| p.len() / assets.len().max(1))
            .unwrap_or(0);
        Self {
            assets,
            num_rows,
            num_simulations,
            values: paths.into_iter().flatten().collect(),
        }
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn num_assets(&self) -> usize {
        self.assets.len()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    pub fn price(&self, day: usize, simulation: usize, asset: usize) -> Option<f64> {
        if day >= self.num_rows || simulation >= self.num_simulations || asset >= self.num_assets() {
            return None;
        }
        let n_assets = self.num_assets();
        Some(self.values[(simulation * self.num_rows + day) * n_assets + asset])
    }

    /// Price path of `asset` in `simulation`, day 0 first.
    pub fn asset_path(&self, simulation: usize, asset: usize) -> Option<Vec<f64>> {
        (0..self.num_rows)
            .map(|day| self.price(day, simulation, asset))
            .collect()
    }
}
