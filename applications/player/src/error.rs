/// Application error types
use cloudtune_catalog_client::CatalogClientError;
use cloudtune_playback::PlayerError;
use cloudtune_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Command(String),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogClientError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
