//! Player Events
//!
//! Notifications for front-end synchronization. The player queues them
//! while handling an intent; the front-end drains and renders them after.

use crate::error::ErrorKind;
use crate::types::{ListKind, PlaybackState};
use cloudtune_core::Track;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track was committed to the sink
    TrackChanged {
        /// The new current track
        track: Track,
    },

    /// The current track was cleared; show placeholder metadata
    NowPlayingCleared,

    /// Position update
    PositionUpdate {
        /// Current position in seconds
        position: f64,
        /// Track length in seconds, if known
        duration: Option<f64>,
    },

    /// Track length became known
    DurationChanged {
        /// Track length in seconds
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume (0.0-1.0)
        volume: f32,
        /// Whether the output is silent
        is_muted: bool,
    },

    /// Search results were replaced
    SearchResultsChanged {
        /// Number of results
        count: usize,
    },

    /// Playlist contents changed
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// A track was added to or removed from favorites
    FavoriteToggled {
        /// The toggled track
        track: Track,
        /// Membership after the toggle
        is_favorite: bool,
        /// New favorites length
        length: usize,
    },

    /// The visible list changed
    TabChanged {
        /// The list now shown
        tab: ListKind,
    },

    /// A follow-up action failed (auto-play, auto-advance, removal hand-over)
    Error {
        /// Error category
        kind: ErrorKind,
        /// Human-readable message
        message: String,
    },
}
