use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Model artifact error: {0}")]
    Artifact(#[from] serde_json::Error),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error(
        "Location out of bounds. This model only supports coordinates within India (Lat: 8-38, Lng: 68-98)."
    )]
    OutOfBounds { latitude: f64, longitude: f64 },

    #[error("No model loaded for target '{0}'")]
    ModelNotFound(String),

    #[error("Insufficient pollutant readings: {0}")]
    InsufficientReadings(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
