/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored blob exists but cannot be decoded
    #[error("Corrupt data under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Key cannot be mapped onto the backend
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Serialization error while writing
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a corrupt data error
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
