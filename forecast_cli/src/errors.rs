use mcforecast::utils::errors::ForecastError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Forecast error: {0}")]
    ForecastError(#[from] ForecastError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
