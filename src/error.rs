use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Unknown group key '{0}'")]
    UnknownGroupKey(String),

    #[error("Unknown metric key '{0}'")]
    UnknownMetricKey(String),

    #[error("Column '{0}' not found in dataset")]
    UnknownColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset was already loaded")]
    DatasetAlreadyLoaded,

    #[error("Dataset has not been loaded")]
    DatasetNotLoaded,
}
