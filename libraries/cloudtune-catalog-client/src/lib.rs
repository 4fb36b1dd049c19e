//! CloudTune Catalog Client
//!
//! HTTP client for the catalog backend that aggregates the music sources.
//!
//! # Features
//!
//! - **Search**: `GET /api/search?keyword=..&sources=a,b` across several sources
//! - **Stream URLs**: `GET /api/song?id=..&source=..` for a playable URL
//! - **Seam**: implements [`cloudtune_core::CatalogLookup`] so the player can
//!   use it interchangeably with test doubles
//!
//! # Example
//!
//! ```ignore
//! use cloudtune_catalog_client::{CatalogClient, CatalogConfig};
//! use cloudtune_core::SourceId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("http://localhost:8082"))?;
//!
//!     let songs = client.search_songs("夜曲", &[SourceId::QQ, SourceId::NETEASE]).await?;
//!     println!("Found {} songs", songs.len());
//!
//!     if let Some(first) = songs.first() {
//!         let url = client.song_url(&first.key()).await?;
//!         println!("Stream: {url}");
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogClientError, Result};
pub use types::{CatalogConfig, SearchResponse, SongUrlResponse};
