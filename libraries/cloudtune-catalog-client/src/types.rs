//! Types for catalog API requests and responses.

use cloudtune_core::Track;
use serde::Deserialize;
use std::time::Duration;

/// Configuration for connecting to the catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the backend (e.g., "http://localhost:8082")
    pub url: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    /// Create a config with no request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Set a whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Response from the search endpoint.
///
/// The backend encodes an empty result set as `"songs": null`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub songs: Option<Vec<Track>>,
    #[serde(default)]
    pub total: Option<usize>,
}

impl SearchResponse {
    /// Reported total, when it disagrees with the songs actually returned.
    pub fn total_mismatch(&self) -> Option<usize> {
        let returned = self.songs.as_ref().map_or(0, Vec::len);
        self.total.filter(|total| *total != returned)
    }

    /// Tracks in the response, empty when absent.
    pub fn into_tracks(self) -> Vec<Track> {
        self.songs.unwrap_or_default()
    }
}

/// Response from the stream URL endpoint.
///
/// Upstream failures arrive as HTTP 200 with an empty `url` and the real
/// status in `code`.
#[derive(Debug, Deserialize)]
pub struct SongUrlResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl SongUrlResponse {
    /// The playable URL, if the response carries a non-blank one.
    pub fn playable_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
