use std::{fs, path::PathBuf};

use clap::Parser;
use mcforecast::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod errors;
mod input;
mod report;

use errors::{CliError, Result};
use input::{read_config, PriceFile};
use report::ForecastReport;

/// Forecast a weighted portfolio with a Monte Carlo simulation of daily returns.
#[derive(Debug, Parser)]
#[command(name = "forecast", version)]
struct Args {
    /// JSON file with the aligned price history of every asset.
    #[arg(long)]
    prices: PathBuf,

    /// Assets to simulate, in weight order.
    #[arg(long, value_delimiter = ',', required = true)]
    assets: Vec<String>,

    /// Weight of each simulated asset.
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    weights: Vec<f64>,

    /// Amount invested today.
    #[arg(long)]
    investment: f64,

    /// Series analysed next to the portfolio but never simulated, e.g. SPY.
    #[arg(long)]
    benchmark: Option<String>,

    /// JSON simulation config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    simulations: Option<usize>,

    #[arg(long)]
    days: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Draw correlated returns from the historical covariance.
    #[arg(long)]
    correlated: bool,

    /// Write the report as JSON to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(n) = self.simulations {
            config = config.with_num_simulations(n);
        }
        if let Some(days) = self.days {
            config = config.with_num_trading_days(days);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.correlated {
            config = config.with_correlation(CorrelationMode::Correlated);
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(args: Args) -> Result<()> {
    if args.benchmark.as_ref().is_some_and(|b| args.assets.contains(b)) {
        return Err(CliError::InvalidArgument(
            "the benchmark cannot also be a simulated asset".to_string(),
        ));
    }
    let config = args.simulation_config()?;
    let prices = PriceFile::read(&args.prices)?.into_price_table()?;
    info!(
        assets = prices.num_assets(),
        rows = prices.dates().len(),
        "loaded price history"
    );

    let mut analysed: Vec<&str> = args.assets.iter().map(String::as_str).collect();
    if let Some(benchmark) = &args.benchmark {
        analysed.push(benchmark.as_str());
    }
    let risk_metrics = analyze(&prices.select(&analysed)?.daily_returns())?;

    let weights = Weights::new(args.weights.clone())?;
    let assets: Vec<&str> = args.assets.iter().map(String::as_str).collect();
    let forecast = forecast_portfolio(&prices, &assets, &weights, &config)?;

    let report = ForecastReport::new(&forecast, args.investment, risk_metrics)?;
    print!("{}", report.render());

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "wrote report");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
