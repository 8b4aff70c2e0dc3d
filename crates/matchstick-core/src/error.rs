//! Error types for scene persistence and construction.

/// Failures of a key-value storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend is unavailable")]
    Unavailable,
    #[error("Failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("Failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Failed to encode scene: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode saved scene: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Invalid match size {width}x{height}: dimensions must be positive")]
    InvalidSize { width: f64, height: f64 },
}
