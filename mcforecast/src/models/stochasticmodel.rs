use rand::Rng;

/// Models that draw one day of returns for every simulated asset.
pub trait StochasticModel: Sync {
    fn num_assets(&self) -> usize;

    /// Fills `out` (one entry per asset) with the fractional returns of a
    /// single simulated day.
    fn gen_daily_returns<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]);
}
