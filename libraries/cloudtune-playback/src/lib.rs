//! CloudTune - Playback Management
//!
//! The player/library state machine behind every CloudTune front-end.
//!
//! This crate provides:
//! - Library state (search results, playlist, favorites) with write-through
//!   persistence
//! - Circular previous/next navigation over the playlist
//! - Playback control (play, pause, seek, volume, mute) over an injected
//!   audio sink
//! - Auto-advance when a track ends, and re-targeting when the playing track
//!   is removed from the playlist
//! - Generation tickets that discard superseded search and play responses
//!
//! # Architecture
//!
//! `cloudtune-playback` owns no I/O of its own:
//! - the catalog is any [`cloudtune_core::CatalogLookup`]
//! - persistence is a [`cloudtune_storage::CollectionStore`]
//! - audio output is any [`AudioSink`]
//!
//! The presentation layer sends intents to [`Player`] and renders from the
//! [`PlayerEvent`]s it drains afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudtune_core::SourceId;
//! use cloudtune_playback::{AudioSink, Player, PlayerConfig, SinkError};
//! use cloudtune_storage::{CollectionStore, MemoryStore};
//! use std::sync::Arc;
//!
//! struct Silent;
//!
//! impl AudioSink for Silent {
//!     fn load(&mut self, _url: &str) {}
//!     fn play(&mut self) -> Result<(), SinkError> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, _position: f64) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//! }
//!
//! # async fn example(catalog: Arc<dyn cloudtune_core::CatalogLookup>) -> cloudtune_playback::Result<()> {
//! let collections = CollectionStore::new(Arc::new(MemoryStore::new()));
//! let mut player = Player::new(PlayerConfig::default(), collections, catalog, Box::new(Silent));
//!
//! player.search("夜曲", &[SourceId::QQ, SourceId::NETEASE]).await?;
//! if let Some(first) = player.library().search_results().first().cloned() {
//!     player.add_to_playlist(first).await; // first add starts playback
//! }
//!
//! for event in player.drain_events() {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod library;
pub mod navigation;
mod player;
mod sink;
pub mod types;
mod volume;

// Public exports
pub use error::{ErrorKind, PlayerError, Result};
pub use events::PlayerEvent;
pub use library::Library;
pub use player::{PlayTicket, Player, PlaylistEdit, SearchTicket};
pub use sink::{AudioSink, SinkError, SinkEvent};
pub use types::{
    format_clock, Completion, ListKind, NowPlaying, PlaybackState, PlaybackStatus, PlayerConfig,
};
pub use volume::{Volume, VolumeLevel, DEFAULT_VOLUME};
