//! Catalog backend client.

use crate::error::{CatalogClientError, Result};
use crate::types::{CatalogConfig, SearchResponse, SongUrlResponse};
use async_trait::async_trait;
use cloudtune_core::{CatalogLookup, SourceId, Track, TrackKey};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the catalog backend.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use cloudtune_catalog_client::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::new("http://localhost:8082"))?;
/// let songs = client.search_songs("夜曲", &[SourceId::QQ]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| CatalogClientError::InvalidUrl(e.to_string()))?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("CloudTune/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CatalogClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the normalized base URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Search the given sources for a keyword.
    ///
    /// Sources are sent as one comma-separated parameter; the backend skips
    /// identifiers it does not know.
    pub async fn search_songs(&self, keyword: &str, sources: &[SourceId]) -> Result<Vec<Track>> {
        let url = format!("{}/api/search", self.base_url);
        let sources = sources
            .iter()
            .map(SourceId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        debug!(url = %url, keyword = %keyword, sources = %sources, "Searching catalog");

        let response = self
            .http
            .get(&url)
            .query(&[("keyword", keyword), ("sources", sources.as_str())])
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;
        let body: SearchResponse = response.json().await.map_err(|e| {
            CatalogClientError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        if let Some(total) = body.total_mismatch() {
            warn!(keyword = %keyword, total, "Search total disagrees with returned songs");
        }
        let tracks = body.into_tracks();
        info!(keyword = %keyword, results = tracks.len(), "Search completed");
        Ok(tracks)
    }

    /// Resolve the stream URL of a track.
    pub async fn song_url(&self, key: &TrackKey) -> Result<String> {
        let url = format!("{}/api/song", self.base_url);
        debug!(url = %url, track = %key, "Resolving stream URL");

        let response = self
            .http
            .get(&url)
            .query(&[("id", key.id.as_str()), ("source", key.source.as_str())])
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;
        let body: SongUrlResponse = response.json().await.map_err(|e| {
            CatalogClientError::ParseError(format!("Failed to parse song response: {}", e))
        })?;

        match body.playable_url() {
            Some(stream) => {
                debug!(track = %key, "Resolved stream URL");
                Ok(stream.to_string())
            }
            None => {
                warn!(track = %key, code = ?body.code, msg = ?body.msg, "Catalog returned no stream URL");
                Err(CatalogClientError::MissingUrl {
                    id: key.id.clone(),
                    source_id: key.source.to_string(),
                    message: body.msg.unwrap_or_else(|| "empty url".to_string()),
                })
            }
        }
    }
}

#[async_trait]
impl CatalogLookup for CatalogClient {
    async fn search(&self, keyword: &str, sources: &[SourceId]) -> cloudtune_core::Result<Vec<Track>> {
        Ok(self.search_songs(keyword, sources).await?)
    }

    async fn stream_url(&self, key: &TrackKey) -> cloudtune_core::Result<String> {
        Ok(self.song_url(key).await?)
    }
}

fn map_send_error(e: reqwest::Error) -> CatalogClientError {
    if e.is_connect() || e.is_timeout() {
        CatalogClientError::Unreachable(e.to_string())
    } else {
        CatalogClientError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(CatalogClientError::ServerError {
            status: status.as_u16(),
            message: error_text.trim().to_string(),
        })
    }
}
