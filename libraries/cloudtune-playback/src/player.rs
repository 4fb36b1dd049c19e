//! Player: library state, playback control and navigation wired together
//!
//! The player is owned by a single task and mutated through `&mut self`.
//! Lookups against the catalog come in two shapes:
//!
//! - `search` / `play` run the whole lookup inline
//! - `begin_*` / `finish_*` split it around a ticket, so a front-end can run
//!   the lookup elsewhere and keep handling input meanwhile
//!
//! Tickets carry a generation number. Only the newest ticket of each kind
//! is applied; older responses come back as [`Completion::Superseded`].
//!
//! Operations that may start another track as a side effect (navigation,
//! playlist edits, a track ending) also come in both shapes. The ticketed
//! form hands the follow-up [`PlayTicket`] back instead of resolving it.

use crate::error::{ErrorKind, PlayerError, Result};
use crate::events::PlayerEvent;
use crate::library::Library;
use crate::navigation;
use crate::sink::{AudioSink, SinkEvent};
use crate::types::{
    Completion, ListKind, NowPlaying, PlaybackState, PlaybackStatus, PlayerConfig,
};
use crate::volume::Volume;
use cloudtune_core::{CatalogLookup, SourceId, Track, TrackKey, TuneError};
use cloudtune_storage::CollectionStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pending search started by [`Player::begin_search`]
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    keyword: String,
    sources: Vec<SourceId>,
}

impl SearchTicket {
    /// Trimmed keyword to search for
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Sources to search
    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }
}

/// Pending playback started by [`Player::begin_play`]
#[derive(Debug, Clone)]
pub struct PlayTicket {
    generation: u64,
    track: Track,
    prior_state: PlaybackState,
}

impl PlayTicket {
    /// Track whose stream URL must be resolved
    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn key(&self) -> TrackKey {
        self.track.key()
    }
}

/// Outcome of a playlist edit made through the ticketed API
#[derive(Debug)]
pub struct PlaylistEdit {
    /// Whether the playlist changed
    pub changed: bool,
    /// Playback the edit started, still to be resolved
    pub follow_up: Option<PlayTicket>,
}

/// The player state machine
pub struct Player {
    library: Library,
    catalog: Arc<dyn CatalogLookup>,
    sink: Box<dyn AudioSink>,

    state: PlaybackState,
    current_track: Option<Track>,
    now_playing: NowPlaying,
    status: PlaybackStatus,
    volume: Volume,
    default_cover: String,

    search_generation: u64,
    play_generation: u64,

    // Event queue for front-end synchronization
    pending_events: Vec<PlayerEvent>,
}

impl Player {
    /// Create a player, loading persisted collections and applying the
    /// initial volume to the sink
    pub fn new(
        config: PlayerConfig,
        collections: CollectionStore,
        catalog: Arc<dyn CatalogLookup>,
        mut sink: Box<dyn AudioSink>,
    ) -> Self {
        let volume = Volume::new(config.volume);
        sink.set_volume(volume.level());

        Self {
            library: Library::load(collections),
            catalog,
            sink,
            state: PlaybackState::Idle,
            current_track: None,
            now_playing: NowPlaying::placeholder(&config.default_cover),
            status: PlaybackStatus::default(),
            volume,
            default_cover: config.default_cover,
            search_generation: 0,
            play_generation: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Search =====

    /// Search the catalog and replace the search results
    ///
    /// Returns the number of results, or `None` for a blank keyword.
    pub async fn search(&mut self, keyword: &str, sources: &[SourceId]) -> Result<Option<usize>> {
        let Some(ticket) = self.begin_search(keyword, sources)? else {
            return Ok(None);
        };

        let catalog = Arc::clone(&self.catalog);
        let result = catalog.search(ticket.keyword(), ticket.sources()).await;
        self.finish_search(ticket, result)?;
        Ok(Some(self.library.search_results().len()))
    }

    /// Validate a search request and issue its ticket
    ///
    /// A blank keyword is not an error; it yields no ticket.
    pub fn begin_search(
        &mut self,
        keyword: &str,
        sources: &[SourceId],
    ) -> Result<Option<SearchTicket>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(None);
        }
        if sources.is_empty() {
            return Err(PlayerError::EmptySelection);
        }

        self.search_generation += 1;
        debug!(
            keyword = %keyword,
            sources = sources.len(),
            generation = self.search_generation,
            "Search started"
        );

        Ok(Some(SearchTicket {
            generation: self.search_generation,
            keyword: keyword.to_string(),
            sources: sources.to_vec(),
        }))
    }

    /// Apply a search response
    ///
    /// On failure the previous results stay in place.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: cloudtune_core::Result<Vec<Track>>,
    ) -> Result<Completion> {
        if ticket.generation != self.search_generation {
            debug!(keyword = %ticket.keyword, "Discarding superseded search response");
            return Ok(Completion::Superseded);
        }

        let tracks = result.map_err(|e| {
            warn!(keyword = %ticket.keyword, error = %e, "Search failed");
            PlayerError::Lookup(e)
        })?;

        info!(keyword = %ticket.keyword, results = tracks.len(), "Search completed");
        let count = tracks.len();
        self.library.replace_search_results(tracks);
        self.pending_events
            .push(PlayerEvent::SearchResultsChanged { count });
        self.select_tab(ListKind::SearchResults);

        Ok(Completion::Applied)
    }

    // ===== Playback Control =====

    /// Resolve the stream URL of `track` and start playing it
    pub async fn play(&mut self, track: Track) -> Result<()> {
        let ticket = self.begin_play(track);
        self.resolve(ticket).await.map(|_| ())
    }

    /// Enter `Loading` for `track` and issue its ticket
    ///
    /// Any earlier play ticket becomes stale.
    pub fn begin_play(&mut self, track: Track) -> PlayTicket {
        // An overlapping request keeps the state from before the first one
        let prior_state = match self.state {
            PlaybackState::Loading => self.prior_state_while_loading(),
            state => state,
        };

        self.play_generation += 1;
        debug!(
            track = %track.key(),
            generation = self.play_generation,
            "Resolving stream URL"
        );
        self.set_state(PlaybackState::Loading);

        PlayTicket {
            generation: self.play_generation,
            track,
            prior_state,
        }
    }

    /// Apply a stream URL response
    ///
    /// A failed lookup restores the state from before `begin_play` and
    /// leaves the current track alone. A successful one commits the track
    /// and starts the sink; if the sink refuses, the track stays loaded and
    /// the player settles in `Paused`.
    pub fn finish_play(
        &mut self,
        ticket: PlayTicket,
        result: cloudtune_core::Result<String>,
    ) -> Result<Completion> {
        if ticket.generation != self.play_generation {
            debug!(track = %ticket.key(), "Discarding superseded stream URL");
            return Ok(Completion::Superseded);
        }

        let url = result.and_then(|url| {
            let url = url.trim();
            if url.is_empty() {
                Err(TuneError::missing_stream_url(&ticket.key()))
            } else {
                Ok(url.to_string())
            }
        });

        let url = match url {
            Ok(url) => url,
            Err(e) => {
                self.set_state(ticket.prior_state);
                return Err(self.playback_failed(format!(
                    "Cannot play \"{}\": {e}",
                    ticket.track.title
                )));
            }
        };

        let PlayTicket { track, .. } = ticket;
        info!(track = %track.key(), title = %track.title, "Now playing");

        self.now_playing = NowPlaying::from_track(&track, &self.default_cover);
        self.status = PlaybackStatus::default();
        self.current_track = Some(track.clone());
        self.pending_events.push(PlayerEvent::TrackChanged { track });
        self.emit_position_update();

        self.sink.load(&url);
        self.sink.set_volume(self.volume.level());
        self.start_sink()?;

        Ok(Completion::Applied)
    }

    /// Pause if playing, resume otherwise
    ///
    /// No-op without a current track or while a stream URL is resolving.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.current_track.is_none() {
            return Ok(());
        }

        match self.state {
            PlaybackState::Loading => Ok(()),
            PlaybackState::Playing => {
                self.sink.pause();
                self.status.is_playing = false;
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Paused | PlaybackState::Idle => self.start_sink(),
        }
    }

    /// Stop playback and clear the current track
    ///
    /// Also invalidates any pending play ticket.
    pub fn stop(&mut self) {
        self.sink.stop();
        self.play_generation += 1;
        self.current_track = None;
        self.now_playing = NowPlaying::placeholder(&self.default_cover);
        self.status = PlaybackStatus::default();
        self.pending_events.push(PlayerEvent::NowPlayingCleared);
        self.set_state(PlaybackState::Idle);
    }

    /// Seek to `fraction` of the track
    ///
    /// Requires a known duration; NaN is ignored and other values are
    /// clamped to 0.0-1.0. Returns whether the sink was moved.
    pub fn seek(&mut self, fraction: f64) -> bool {
        if fraction.is_nan() {
            return false;
        }
        let Some(duration) = self
            .status
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
        else {
            return false;
        };

        let position = fraction.clamp(0.0, 1.0) * duration;
        self.sink.seek(position);
        self.status.current_time = position;
        self.emit_position_update();
        true
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0; NaN ignored)
    pub fn set_volume(&mut self, level: f32) -> bool {
        if !self.volume.set_level(level) {
            return false;
        }
        self.apply_volume();
        true
    }

    /// Toggle mute, returning the new level
    pub fn toggle_mute(&mut self) -> f32 {
        let level = self.volume.toggle_mute();
        self.apply_volume();
        level
    }

    // ===== Navigation =====

    /// Play the playlist entry after the current track
    pub async fn next(&mut self) -> Result<Completion> {
        match self.begin_next() {
            Some(ticket) => self.resolve(ticket).await,
            None => Ok(Completion::Ignored),
        }
    }

    /// Play the playlist entry before the current track
    pub async fn previous(&mut self) -> Result<Completion> {
        match self.begin_previous() {
            Some(ticket) => self.resolve(ticket).await,
            None => Ok(Completion::Ignored),
        }
    }

    /// Ticketed [`Player::next`]; `None` when there is nothing to move to
    pub fn begin_next(&mut self) -> Option<PlayTicket> {
        let target = self.next_entry();
        target.map(|track| self.begin_play(track))
    }

    /// Ticketed [`Player::previous`]; `None` when there is nothing to move to
    pub fn begin_previous(&mut self) -> Option<PlayTicket> {
        let target = self
            .current_track
            .as_ref()
            .and_then(|current| {
                navigation::previous(self.library.playlist(), Some(&current.key()))
            })
            .cloned();
        target.map(|track| self.begin_play(track))
    }

    // ===== Library =====

    /// Append to the playlist
    ///
    /// The first track added while nothing is loaded starts playing right
    /// away; a failure there is reported as an event. Returns whether the
    /// track was new.
    pub async fn add_to_playlist(&mut self, track: Track) -> bool {
        let edit = self.begin_add_to_playlist(track);
        self.resolve_follow_up(edit.follow_up).await;
        edit.changed
    }

    /// Ticketed [`Player::add_to_playlist`]
    pub fn begin_add_to_playlist(&mut self, track: Track) -> PlaylistEdit {
        if !self.library.add_to_playlist(track.clone()) {
            return PlaylistEdit {
                changed: false,
                follow_up: None,
            };
        }
        self.emit_playlist_changed();

        let follow_up = self
            .current_track
            .is_none()
            .then(|| self.begin_play(track));
        PlaylistEdit {
            changed: true,
            follow_up,
        }
    }

    /// Remove from the playlist
    ///
    /// Removing the current track hands playback to the entry that followed
    /// it, or stops when the playlist is now empty.
    pub async fn remove_from_playlist(&mut self, key: &TrackKey) -> bool {
        let edit = self.begin_remove_from_playlist(key);
        self.resolve_follow_up(edit.follow_up).await;
        edit.changed
    }

    /// Ticketed [`Player::remove_from_playlist`]
    pub fn begin_remove_from_playlist(&mut self, key: &TrackKey) -> PlaylistEdit {
        let Some((index, removed)) = self.library.remove_from_playlist(key) else {
            return PlaylistEdit {
                changed: false,
                follow_up: None,
            };
        };
        debug!(track = %key, index, "Removed from playlist");
        self.emit_playlist_changed();

        let was_current = self
            .current_track
            .as_ref()
            .is_some_and(|current| current.same_as(&removed));
        let mut follow_up = None;
        if was_current {
            match navigation::after_removal(self.library.playlist(), index).cloned() {
                Some(successor) => follow_up = Some(self.begin_play(successor)),
                None => self.stop(),
            }
        }
        PlaylistEdit {
            changed: true,
            follow_up,
        }
    }

    /// Add to favorites if absent, remove otherwise; returns new membership
    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        let is_favorite = self.library.toggle_favorite(track);
        self.pending_events.push(PlayerEvent::FavoriteToggled {
            track: track.clone(),
            is_favorite,
            length: self.library.favorites().len(),
        });
        is_favorite
    }

    /// Show a different list
    pub fn select_tab(&mut self, tab: ListKind) {
        if self.library.select_tab(tab) {
            self.pending_events.push(PlayerEvent::TabChanged { tab });
        }
    }

    pub fn find(&self, list: ListKind, key: &TrackKey) -> Option<&Track> {
        self.library.find(list, key)
    }

    pub fn is_in_playlist(&self, track: &Track) -> bool {
        self.library.is_in_playlist(track)
    }

    pub fn is_in_favorites(&self, track: &Track) -> bool {
        self.library.is_in_favorites(track)
    }

    // ===== Sink Events =====

    /// Feed back an event reported by the sink
    ///
    /// When a track ends the next playlist entry starts. With nothing to
    /// follow, or while another track is already resolving, the player
    /// stays on the finished track in `Paused`.
    pub async fn handle_sink_event(&mut self, event: SinkEvent) {
        let follow_up = self.apply_sink_event(event);
        self.resolve_follow_up(follow_up).await;
    }

    /// Ticketed [`Player::handle_sink_event`]
    ///
    /// Returns the ticket of the next track when the event was `Ended`.
    pub fn apply_sink_event(&mut self, event: SinkEvent) -> Option<PlayTicket> {
        match event {
            SinkEvent::TimeUpdate { position } => {
                if position.is_finite() && position >= 0.0 {
                    self.status.current_time = position;
                    self.emit_position_update();
                }
                None
            }
            SinkEvent::MetadataLoaded { duration } => {
                if duration.is_finite() && duration > 0.0 {
                    self.status.duration = Some(duration);
                    self.pending_events
                        .push(PlayerEvent::DurationChanged { duration });
                }
                None
            }
            SinkEvent::Ended => self.handle_ended(),
        }
    }

    fn handle_ended(&mut self) -> Option<PlayTicket> {
        self.status.is_playing = false;
        if self.state == PlaybackState::Loading {
            return None;
        }
        // The sink has stopped; a failed advance falls back to this state
        self.set_state(PlaybackState::Paused);

        let next = self.next_entry()?;
        debug!(track = %next.key(), "Track ended, advancing");
        Some(self.begin_play(next))
    }

    // ===== Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn status(&self) -> &PlaybackStatus {
        &self.status
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Catalog used for lookups, for running ticketed requests elsewhere
    pub fn catalog(&self) -> Arc<dyn CatalogLookup> {
        Arc::clone(&self.catalog)
    }

    // ===== Events =====

    /// Drain pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    async fn resolve(&mut self, ticket: PlayTicket) -> Result<Completion> {
        let catalog = Arc::clone(&self.catalog);
        let result = catalog.stream_url(&ticket.key()).await;
        self.finish_play(ticket, result)
    }

    async fn resolve_follow_up(&mut self, ticket: Option<PlayTicket>) {
        let Some(ticket) = ticket else { return };
        // Failures are already queued as events by finish_play
        if let Err(e) = self.resolve(ticket).await {
            debug!(error = %e, "Follow-up playback failed");
        }
    }

    fn next_entry(&self) -> Option<Track> {
        self.current_track
            .as_ref()
            .and_then(|current| navigation::next(self.library.playlist(), Some(&current.key())))
            .cloned()
    }

    fn start_sink(&mut self) -> Result<()> {
        match self.sink.play() {
            Ok(()) => {
                self.status.is_playing = true;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => {
                self.status.is_playing = false;
                self.set_state(PlaybackState::Paused);
                Err(self.playback_failed(e.to_string()))
            }
        }
    }

    fn prior_state_while_loading(&self) -> PlaybackState {
        if self.current_track.is_some() {
            if self.status.is_playing {
                PlaybackState::Playing
            } else {
                PlaybackState::Paused
            }
        } else {
            PlaybackState::Idle
        }
    }

    fn playback_failed(&mut self, message: String) -> PlayerError {
        warn!(error = %message, "Playback failed");
        self.pending_events.push(PlayerEvent::Error {
            kind: ErrorKind::Playback,
            message: message.clone(),
        });
        PlayerError::Playback(message)
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "Playback state changed");
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn apply_volume(&mut self) {
        self.sink.set_volume(self.volume.level());
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(PlayerEvent::PlaylistChanged {
            length: self.library.playlist().len(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlayerEvent::PositionUpdate {
            position: self.status.current_time,
            duration: self.status.duration,
        });
    }
}
