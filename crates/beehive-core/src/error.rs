use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BeehiveError {
    #[error("failed to fetch manifest {location}: {reason}")]
    ManifestFetch { location: String, reason: String },

    #[error("invalid manifest {location}: {reason}")]
    ManifestInvalid { location: String, reason: String },

    #[error("annotation query against {endpoint} failed: {reason}")]
    QueryFailed { endpoint: String, reason: String },

    #[error("invalid query results: {0}")]
    ResultsInvalid(String),

    #[error("canvas '{0}' not found in any loaded manifest")]
    CanvasNotFound(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
