//! Playlist and favorites persistence
//!
//! Both collections are stored as JSON arrays of tracks under fixed keys.
//! Reads never fail: a missing key means an empty collection, and a blob
//! that cannot be read or decoded is logged and treated as empty.

use crate::error::{Result, StorageError};
use crate::kv::KeyValueStore;
use cloudtune_core::Track;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key holding the playlist
pub const PLAYLIST_KEY: &str = "playlist";

/// Key holding the favorites list
pub const FAVORITES_KEY: &str = "favorites";

/// Typed access to the persisted track collections
#[derive(Clone)]
pub struct CollectionStore {
    store: Arc<dyn KeyValueStore>,
}

impl CollectionStore {
    /// Wrap a key-value backend
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the playlist, empty if missing or corrupt
    pub fn load_playlist(&self) -> Vec<Track> {
        self.load_or_empty(PLAYLIST_KEY)
    }

    /// Load the favorites, empty if missing or corrupt
    pub fn load_favorites(&self) -> Vec<Track> {
        self.load_or_empty(FAVORITES_KEY)
    }

    /// Persist the full playlist
    pub fn save_playlist(&self, tracks: &[Track]) -> Result<()> {
        self.save(PLAYLIST_KEY, tracks)
    }

    /// Persist the full favorites list
    pub fn save_favorites(&self, tracks: &[Track]) -> Result<()> {
        self.save(FAVORITES_KEY, tracks)
    }

    /// Load a collection, surfacing read and decode failures
    ///
    /// Duplicate (id, source) entries are dropped, keeping the first.
    pub fn try_load(&self, key: &str) -> Result<Vec<Track>> {
        let Some(blob) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        let tracks: Vec<Track> =
            serde_json::from_str(&blob).map_err(|e| StorageError::corrupt(key, e))?;

        let mut seen = HashSet::new();
        let unique: Vec<Track> = tracks
            .into_iter()
            .filter(|track| seen.insert(track.key()))
            .collect();

        debug!(key = %key, tracks = unique.len(), "Loaded collection");
        Ok(unique)
    }

    fn load_or_empty(&self, key: &str) -> Vec<Track> {
        match self.try_load(key) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load collection, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self, key: &str, tracks: &[Track]) -> Result<()> {
        let blob = serde_json::to_string(tracks)?;
        self.store.set(key, blob)?;
        debug!(key = %key, tracks = tracks.len(), "Saved collection");
        Ok(())
    }
}
