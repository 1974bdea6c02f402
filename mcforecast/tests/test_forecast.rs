use chrono::NaiveDate;
use mcforecast::prelude::*;

fn trading_dates(n: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2019, 1, 31).unwrap();
    (0..n as i64)
        .map(|i| start + chrono::Duration::days(i))
        .collect()
}

/// Deterministic zig-zag closes so fitted parameters are non-trivial.
fn zigzag(asset: &str, start: f64, up: f64, down: f64, n: usize) -> PriceSeries {
    let mut price = start;
    let closes = trading_dates(n).into_iter().enumerate().map(|(i, d)| {
        if i > 0 {
            price *= if i % 3 == 0 { 1.0 - down } else { 1.0 + up };
        }
        (d, price)
    });
    PriceSeries::from_closes(asset, closes.collect::<Vec<_>>()).unwrap()
}

fn scenario_assets() -> Vec<AssetModel> {
    vec![
        AssetModel::new("AAPL", DistributionParams::new(0.0005, 0.01).unwrap(), 100.0).unwrap(),
        AssetModel::new("TSLA", DistributionParams::new(0.0003, 0.008).unwrap(), 50.0).unwrap(),
    ]
}

#[test]
fn test_three_year_two_asset_scenario() -> Result<()> {
    let assets = scenario_assets();
    let weights = Weights::new(vec![0.6, 0.4])?;
    let config = SimulationConfig::new().with_seed(42);
    let forecast = MonteCarloEngine::new(&assets, &weights)
        .with_config(config)
        .run()?;

    assert_eq!(forecast.portfolio().num_rows(), 757);
    assert_eq!(forecast.portfolio().num_simulations(), 500);
    let terminal = forecast.terminal_distribution();
    assert_eq!(terminal.len(), 500);

    let summary = forecast.summary();
    for label in SUMMARY_LABELS {
        assert!(summary.get(label).is_some(), "missing {}", label);
    }
    assert_eq!(summary.count, 500);
    assert!(summary.get("5%").unwrap() <= summary.get("50%").unwrap());
    assert!(summary.get("50%").unwrap() <= summary.get("95%").unwrap());

    // expected growth is roughly exp(756 * weighted drift)
    assert!(summary.mean > 1.0 && summary.mean < 1.6);
    Ok(())
}

#[test]
fn test_summary_percentiles_are_ordered() -> Result<()> {
    let assets = scenario_assets();
    let weights = Weights::new(vec![0.5, 0.5])?;
    for seed in [1u64, 7, 99] {
        let config = SimulationConfig::new()
            .with_num_simulations(200)
            .with_num_trading_days(100)
            .with_seed(seed);
        let forecast = MonteCarloEngine::new(&assets, &weights)
            .with_config(config)
            .run()?;
        let s = forecast.summary();
        assert!(s.min <= s.p5);
        assert!(s.p5 <= s.p25);
        assert!(s.p25 <= s.p50);
        assert!(s.p50 <= s.p75);
        assert!(s.p75 <= s.p95);
        assert!(s.p95 <= s.max);
    }
    Ok(())
}

#[test]
fn test_seeded_runs_are_bit_identical() -> Result<()> {
    let assets = scenario_assets();
    let weights = Weights::new(vec![0.6, 0.4])?;
    let config = SimulationConfig::new()
        .with_num_simulations(50)
        .with_num_trading_days(252)
        .with_seed(123);
    let first = MonteCarloEngine::new(&assets, &weights)
        .with_config(config.clone())
        .run()?;
    let second = MonteCarloEngine::new(&assets, &weights)
        .with_config(config)
        .run()?;
    assert_eq!(first.portfolio(), second.portfolio());
    assert_eq!(first.summary(), second.summary());

    let other = MonteCarloEngine::new(&assets, &weights)
        .with_config(SimulationConfig::new().with_num_simulations(50).with_num_trading_days(252).with_seed(124))
        .run()?;
    assert_ne!(first.portfolio(), other.portfolio());
    Ok(())
}

#[test]
fn test_unseeded_run_reports_its_seed() -> Result<()> {
    let assets = scenario_assets();
    let weights = Weights::new(vec![0.6, 0.4])?;
    let config = SimulationConfig::new()
        .with_num_simulations(10)
        .with_num_trading_days(20);
    let first = MonteCarloEngine::new(&assets, &weights)
        .with_config(config.clone())
        .run()?;
    let replay = MonteCarloEngine::new(&assets, &weights)
        .with_config(config.with_seed(first.seed()))
        .run()?;
    assert_eq!(first.portfolio(), replay.portfolio());
    Ok(())
}

#[test]
fn test_single_simulation() -> Result<()> {
    let assets = scenario_assets();
    let weights = Weights::new(vec![0.6, 0.4])?;
    let config = SimulationConfig::new()
        .with_num_simulations(1)
        .with_num_trading_days(10)
        .with_seed(5);
    let forecast = MonteCarloEngine::new(&assets, &weights)
        .with_config(config)
        .run()?;
    assert_eq!(forecast.portfolio().num_simulations(), 1);
    assert_eq!(forecast.portfolio().get(0, 0), Some(1.0));
    assert_eq!(forecast.summary().count, 1);
    assert_eq!(forecast.summary().p5, forecast.summary().p95);
    Ok(())
}

#[test]
fn test_zero_counts_are_rejected() -> Result<()> {
    let assets = scenario_assets();
    let weights = Weights::new(vec![0.6, 0.4])?;
    for config in [
        SimulationConfig::new().with_num_simulations(0),
        SimulationConfig::new().with_num_trading_days(0),
    ] {
        let result = MonteCarloEngine::new(&assets, &weights)
            .with_config(config)
            .run();
        assert!(matches!(result, Err(ForecastError::InvalidParameter { .. })));
    }
    Ok(())
}

#[test]
fn test_weights_are_passed_through_unnormalized() -> Result<()> {
    let assets = vec![
        AssetModel::new("A", DistributionParams::new(0.0, 0.0)?, 10.0)?,
        AssetModel::new("B", DistributionParams::new(0.0, 0.0)?, 20.0)?,
    ];
    let weights = Weights::new(vec![1.0, 1.5])?;
    let config = SimulationConfig::new()
        .with_num_simulations(5)
        .with_num_trading_days(5)
        .with_seed(0);
    let forecast = MonteCarloEngine::new(&assets, &weights)
        .with_config(config)
        .run()?;
    assert!(forecast.terminal_distribution().iter().all(|v| *v == 2.5));
    let ci = forecast.confidence_interval(1000.0)?;
    assert_eq!(ci.lower, 2500.0);
    assert_eq!(ci.upper, 2500.0);
    Ok(())
}

#[test]
fn test_constant_price_history_gives_flat_forecast() -> Result<()> {
    let dates = trading_dates(30);
    let flat = PriceSeries::from_closes("F", dates.iter().map(|d| (*d, 12.0)))?;
    let also_flat = PriceSeries::from_closes("AAL", dates.iter().map(|d| (*d, 20.0)))?;
    let table = PriceTable::new(vec![flat, also_flat])?;
    let weights = Weights::new(vec![0.5, 0.5])?;
    let config = SimulationConfig::new()
        .with_num_simulations(25)
        .with_num_trading_days(60)
        .with_seed(8)
        .with_retained_asset_paths(true);
    let forecast = forecast_portfolio(&table, &["F", "AAL"], &weights, &config)?;
    let prices = forecast.asset_paths().unwrap();
    for s in 0..25 {
        assert!(prices.asset_path(s, 0).unwrap().iter().all(|p| *p == 12.0));
        assert!(prices.asset_path(s, 1).unwrap().iter().all(|p| *p == 20.0));
    }
    assert!(forecast.terminal_distribution().iter().all(|v| *v == 1.0));
    Ok(())
}

#[test]
fn test_benchmark_is_excluded_from_simulation() -> Result<()> {
    let n = 120;
    let table = PriceTable::new(vec![
        zigzag("AAPL", 150.0, 0.012, 0.015, n),
        zigzag("TSLA", 300.0, 0.02, 0.03, n),
        zigzag("SPY", 400.0, 0.004, 0.005, n),
    ])?;
    let weights = Weights::new(vec![0.7, 0.3])?;
    let config = SimulationConfig::new()
        .with_num_simulations(30)
        .with_num_trading_days(50)
        .with_seed(77)
        .with_retained_asset_paths(true);
    let forecast = forecast_portfolio(&table, &["AAPL", "TSLA"], &weights, &config)?;
    assert_eq!(forecast.assets(), &["AAPL".to_string(), "TSLA".to_string()]);
    let prices = forecast.asset_paths().unwrap();
    assert_eq!(prices.num_assets(), 2);
    assert_eq!(prices.price(0, 0, 0), Some(table.anchor_price("AAPL")?));
    assert_eq!(prices.price(0, 0, 1), Some(table.anchor_price("TSLA")?));

    // all three weights for two assets
    let wrong = Weights::new(vec![0.5, 0.3, 0.2])?;
    assert!(matches!(
        forecast_portfolio(&table, &["AAPL", "TSLA"], &wrong, &config),
        Err(ForecastError::InvalidParameter { .. })
    ));
    Ok(())
}

#[test]
fn test_correlated_forecast_from_history() -> Result<()> {
    let n = 200;
    let table = PriceTable::new(vec![
        zigzag("AAPL", 150.0, 0.012, 0.015, n),
        zigzag("GOOGL", 2000.0, 0.01, 0.012, n),
    ])?;
    let weights = Weights::new(vec![0.5, 0.5])?;
    let config = SimulationConfig::new()
        .with_num_simulations(40)
        .with_num_trading_days(30)
        .with_seed(3)
        .with_correlation(CorrelationMode::Correlated);
    let correlated = forecast_portfolio(&table, &["AAPL", "GOOGL"], &weights, &config)?;
    assert_eq!(correlated.terminal_distribution().len(), 40);
    let again = forecast_portfolio(&table, &["AAPL", "GOOGL"], &weights, &config)?;
    assert_eq!(correlated.portfolio(), again.portfolio());
    Ok(())
}

#[test]
fn test_short_history_is_insufficient() -> Result<()> {
    let dates = trading_dates(2);
    let table = PriceTable::new(vec![PriceSeries::from_closes(
        "TWTR",
        vec![(dates[0], 40.0), (dates[1], 41.0)],
    )?])?;
    let weights = Weights::new(vec![1.0])?;
    let result = forecast_portfolio(&table, &["TWTR"], &weights, &SimulationConfig::new());
    assert!(matches!(result, Err(ForecastError::InsufficientData { .. })));
    Ok(())
}
