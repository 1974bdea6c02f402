use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Insufficient data for {asset}: {observations} valid return rows, at least 2 required")]
    InsufficientData { asset: String, observations: usize },
    #[error("Misaligned series {asset}: {reason}")]
    MisalignedSeries { asset: String, reason: String },
    #[error("Invalid parameter {parameter}: {reason}")]
    InvalidParameter { parameter: String, reason: String },
    #[error("Numeric instability: {0}")]
    NumericInstability(String),
    #[error("Not found: {0}")]
    NotFoundError(String),
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] serde_json::Error),
    #[error("Thread pool error: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}

impl ForecastError {
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub fn misaligned(asset: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::MisalignedSeries {
            asset: asset.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<ForecastError> for String {
    fn from(e: ForecastError) -> Self {
        e.to_string()
    }
}
