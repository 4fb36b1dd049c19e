//! Error types for the catalog client.

use cloudtune_core::TuneError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog backend.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend is offline or unreachable
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// Backend returned an error response
    #[error("Catalog error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid base URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend answered without a usable stream URL
    #[error("No stream URL for {id} from {source_id}: {message}")]
    MissingUrl {
        id: String,
        source_id: String,
        message: String,
    },
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;

impl From<CatalogClientError> for TuneError {
    fn from(err: CatalogClientError) -> Self {
        match err {
            CatalogClientError::ServerError { status, message } => {
                TuneError::Catalog { status, message }
            }
            CatalogClientError::MissingUrl { id, source_id, .. } => {
                TuneError::MissingStreamUrl { id, source_id }
            }
            CatalogClientError::ParseError(msg) => TuneError::Parse(msg),
            CatalogClientError::InvalidUrl(msg) => TuneError::InvalidInput(msg),
            CatalogClientError::Unreachable(msg) => TuneError::Network(msg),
            CatalogClientError::Request(e) => TuneError::Network(e.to_string()),
        }
    }
}
