use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Column '{column}' not found in {}", file.display())]
    MissingColumn { file: PathBuf, column: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error(
        "Cannot normalize scores: maximum closest-k average distance is {max_distance} km \
         (every station coincides with a reference point)"
    )]
    Normalization { max_distance: f64 },

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
