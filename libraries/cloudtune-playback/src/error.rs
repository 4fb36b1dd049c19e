//! Error types for the player

use cloudtune_core::TuneError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player errors
///
/// Every error is local to the intent that raised it; the player is left in
/// a consistent, usable state.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Search was requested with no source selected
    #[error("Select at least one music source")]
    EmptySelection,

    /// Search backend failed or answered with a non-success status
    #[error("Search failed: {0}")]
    Lookup(#[source] TuneError),

    /// Stream URL could not be resolved, or the sink refused to play
    #[error("Playback failed: {0}")]
    Playback(String),
}

impl PlayerError {
    /// Category of the error, for presentation
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlayerError::EmptySelection => ErrorKind::EmptySelection,
            PlayerError::Lookup(_) => ErrorKind::Lookup,
            PlayerError::Playback(_) => ErrorKind::Playback,
        }
    }
}

/// Error category
///
/// Front-ends prompt for `EmptySelection`, show `Lookup` inline in the
/// result list, and raise `Playback` as a blocking notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No source selected
    EmptySelection,
    /// Search failure
    Lookup,
    /// Playback failure
    Playback,
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
