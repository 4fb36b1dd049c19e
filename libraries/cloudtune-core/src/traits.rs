/// Core traits for CloudTune
use crate::error::Result;
use crate::types::{SourceId, Track, TrackKey};
use async_trait::async_trait;

/// Catalog lookup service
///
/// Abstracts the remote search/streaming backend so the player can be
/// driven by an HTTP client in production and by fakes in tests.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Search every given source for `keyword`
    ///
    /// An empty result list is a success, not an error.
    ///
    /// # Errors
    /// Returns an error if the service is unreachable or answers with a
    /// non-success status.
    async fn search(&self, keyword: &str, sources: &[SourceId]) -> Result<Vec<Track>>;

    /// Resolve a playable stream URL for a track
    ///
    /// # Errors
    /// Returns `TuneError::MissingStreamUrl` when the service answers without
    /// a usable URL, or a transport/status error.
    async fn stream_url(&self, key: &TrackKey) -> Result<String>;
}
