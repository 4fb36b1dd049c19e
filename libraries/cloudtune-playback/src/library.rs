//! Library state: search results, playlist and favorites
//!
//! The playlist and favorites are written through to the collection store
//! after every mutation. A failed write is logged and otherwise ignored; the
//! in-memory lists stay authoritative for the session.

use crate::types::ListKind;
use cloudtune_core::{Track, TrackKey};
use cloudtune_storage::CollectionStore;
use tracing::{debug, warn};

/// Track lists owned by the player
pub struct Library {
    search_results: Vec<Track>,
    playlist: Vec<Track>,
    favorites: Vec<Track>,
    active_tab: ListKind,
    collections: CollectionStore,
}

impl Library {
    /// Load persisted playlist and favorites
    ///
    /// Search results start empty and the playlist tab is shown.
    pub fn load(collections: CollectionStore) -> Self {
        let playlist = collections.load_playlist();
        let favorites = collections.load_favorites();
        debug!(
            playlist = playlist.len(),
            favorites = favorites.len(),
            "Library loaded"
        );

        Self {
            search_results: Vec::new(),
            playlist,
            favorites,
            active_tab: ListKind::Playlist,
            collections,
        }
    }

    pub fn search_results(&self) -> &[Track] {
        &self.search_results
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn favorites(&self) -> &[Track] {
        &self.favorites
    }

    /// List currently shown by the front-end
    pub fn active_tab(&self) -> ListKind {
        self.active_tab
    }

    /// Tracks of the given list
    pub fn list(&self, kind: ListKind) -> &[Track] {
        match kind {
            ListKind::SearchResults => &self.search_results,
            ListKind::Playlist => &self.playlist,
            ListKind::Favorites => &self.favorites,
        }
    }

    /// Look up a track by key inside one list
    pub fn find(&self, kind: ListKind, key: &TrackKey) -> Option<&Track> {
        self.list(kind).iter().find(|track| track.matches(key))
    }

    /// Show a different list; returns false if it was already shown
    pub fn select_tab(&mut self, tab: ListKind) -> bool {
        if self.active_tab == tab {
            return false;
        }
        self.active_tab = tab;
        true
    }

    /// Replace search results wholesale (not persisted)
    pub(crate) fn replace_search_results(&mut self, tracks: Vec<Track>) {
        self.search_results = tracks;
    }

    /// Append to the playlist unless an entry with the same key exists
    pub fn add_to_playlist(&mut self, track: Track) -> bool {
        if self.is_in_playlist(&track) {
            debug!(track = %track.key(), "Already in playlist");
            return false;
        }

        self.playlist.push(track);
        self.persist_playlist();
        true
    }

    /// Remove the entry with `key`, returning its former index and the track
    pub fn remove_from_playlist(&mut self, key: &TrackKey) -> Option<(usize, Track)> {
        let index = self.playlist.iter().position(|track| track.matches(key))?;
        let removed = self.playlist.remove(index);
        self.persist_playlist();
        Some((index, removed))
    }

    /// Add to favorites if absent, remove if present
    ///
    /// Returns the membership after the toggle.
    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        let is_favorite = match self.favorites.iter().position(|t| t.same_as(track)) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(track.clone());
                true
            }
        };

        if let Err(e) = self.collections.save_favorites(&self.favorites) {
            warn!(error = %e, "Failed to persist favorites");
        }
        is_favorite
    }

    pub fn is_in_playlist(&self, track: &Track) -> bool {
        self.playlist.iter().any(|t| t.same_as(track))
    }

    pub fn is_in_favorites(&self, track: &Track) -> bool {
        self.favorites.iter().any(|t| t.same_as(track))
    }

    fn persist_playlist(&self) {
        if let Err(e) = self.collections.save_playlist(&self.playlist) {
            warn!(error = %e, "Failed to persist playlist");
        }
    }
}
