//! Core types for playback management

use crate::volume::DEFAULT_VOLUME;
use cloudtune_core::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cover shown when a track has none, or nothing is playing
pub const DEFAULT_COVER: &str = "/static/images/default-cover.jpg";

/// Title shown when nothing is playing
pub const PLACEHOLDER_TITLE: &str = "Not playing";

/// Artist shown when nothing is playing
pub const PLACEHOLDER_ARTIST: &str = "Unknown artist";

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Resolving a stream URL
    Loading,

    /// Currently playing
    Playing,

    /// Track loaded but not playing
    Paused,
}

/// Position and duration of the loaded track, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Whether the sink is producing audio
    pub is_playing: bool,

    /// Current position
    pub current_time: f64,

    /// Track length, known once the sink has loaded metadata
    pub duration: Option<f64>,
}

impl PlaybackStatus {
    /// Fraction of the track already played, 0 while the duration is unknown
    pub fn progress_fraction(&self) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.current_time / duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

/// Now-playing display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub cover: String,
}

impl NowPlaying {
    /// Placeholder shown when nothing is loaded
    pub fn placeholder(default_cover: &str) -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            artist: PLACEHOLDER_ARTIST.to_string(),
            cover: default_cover.to_string(),
        }
    }

    /// Display metadata for a track
    pub fn from_track(track: &Track, default_cover: &str) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            cover: track
                .cover
                .clone()
                .unwrap_or_else(|| default_cover.to_string()),
        }
    }
}

/// The three track lists a front-end can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    /// Results of the last search
    SearchResults,

    /// The persisted playlist
    Playlist,

    /// The persisted favorites
    Favorites,
}

impl ListKind {
    /// Tab identifier used by front-ends
    pub fn tab_id(&self) -> &'static str {
        match self {
            ListKind::SearchResults => "search-results",
            ListKind::Playlist => "playlist",
            ListKind::Favorites => "favorites",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_id())
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search-results" | "search" | "results" => Ok(ListKind::SearchResults),
            "playlist" => Ok(ListKind::Playlist),
            "favorites" | "favourites" | "fav" => Ok(ListKind::Favorites),
            other => Err(format!("unknown list: {other}")),
        }
    }
}

/// Outcome of an intent whose response may have been overtaken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was applied to the player
    Applied,

    /// A newer request of the same kind started first; nothing changed
    Superseded,

    /// The intent had nothing to act on (no current track, nothing to navigate to)
    Ignored,
}

/// Configuration for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Cover shown for tracks without one
    pub default_cover: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            default_cover: DEFAULT_COVER.to_string(),
        }
    }
}

/// Format seconds as `m:ss`
///
/// Negative or non-finite input renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
