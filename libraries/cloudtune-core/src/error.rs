/// Core error types for CloudTune
use thiserror::Error;

/// Result type alias using `TuneError`
pub type Result<T> = std::result::Result<T, TuneError>;

/// Core error type for CloudTune
#[derive(Error, Debug)]
pub enum TuneError {
    /// The catalog service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The catalog service answered with a non-success status
    #[error("Catalog error ({status}): {message}")]
    Catalog {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The catalog answered but no playable URL was present
    #[error("No stream URL for {id} from {source_id}")]
    MissingStreamUrl {
        /// Track identifier
        id: String,
        /// Source identifier
        source_id: String,
    },

    /// A response could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl TuneError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a missing stream URL error for a track
    pub fn missing_stream_url(key: &crate::TrackKey) -> Self {
        Self::MissingStreamUrl {
            id: key.id.clone(),
            source_id: key.source.to_string(),
        }
    }
}
