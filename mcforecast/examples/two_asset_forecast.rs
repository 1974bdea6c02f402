use chrono::NaiveDate;
use mcforecast::prelude::*;

fn history(asset: &str, start: f64, drift: f64, wiggle: f64) -> Result<PriceSeries> {
    let first = NaiveDate::from_ymd_opt(2019, 1, 31).unwrap();
    let mut price = start;
    let closes = (0..756)
        .map(|i| {
            let date = first + chrono::Duration::days(i);
            if i > 0 {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                price *= 1.0 + drift + sign * wiggle;
            }
            (date, price)
        })
        .collect::<Vec<_>>();
    PriceSeries::from_closes(asset, closes)
}

fn main() -> Result<()> {
    let prices = PriceTable::new(vec![
        history("AAPL", 166.0, 0.0012, 0.015)?,
        history("TSLA", 61.0, 0.0025, 0.035)?,
        history("SPY", 270.0, 0.0006, 0.008)?,
    ])?;

    for metrics in analyze(&prices.daily_returns())? {
        println!(
            "{:<5} annual return {:>7.2}%  volatility {:>7.2}%  sharpe {:?}",
            metrics.asset,
            metrics.annualized_return * 100.0,
            metrics.annualized_volatility * 100.0,
            metrics.sharpe_ratio
        );
    }

    let weights = Weights::new(vec![0.6, 0.4])?;
    let config = SimulationConfig::new().with_seed(2022);
    let forecast = forecast_portfolio(&prices, &["AAPL", "TSLA"], &weights, &config)?;

    println!("{}", forecast.summary());
    let investment = 10_000.0;
    let ci = forecast.confidence_interval(investment)?;
    println!(
        "There is a 95% chance that ${:.2} invested in AAPL/TSLA will end within {}",
        investment, ci
    );
    Ok(())
}
