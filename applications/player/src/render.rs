//! Text rendering for the shell

use cloudtune_core::Track;
use cloudtune_playback::{
    format_clock, ListKind, PlaybackState, Player, PlayerEvent, Volume, VolumeLevel,
};

/// One numbered row of a track list
pub fn track_row(row: usize, track: &Track, in_playlist: bool, is_favorite: bool) -> String {
    let mut line = format!(
        "{row:>3}. {} - {} [{}]",
        track.title,
        track.artist,
        track.source.display_name()
    );
    if let Some(album) = &track.album {
        line.push_str(&format!(" <{album}>"));
    }
    if in_playlist {
        line.push_str(" +");
    }
    if is_favorite {
        line.push_str(" *");
    }
    line
}

/// The given list with playlist and favorite markers
pub fn list(player: &Player, kind: ListKind) -> String {
    let tracks = player.library().list(kind);
    if tracks.is_empty() {
        return match kind {
            ListKind::SearchResults => "No results".to_string(),
            ListKind::Playlist => "Playlist is empty".to_string(),
            ListKind::Favorites => "No favorites yet".to_string(),
        };
    }

    let rows: Vec<String> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            track_row(
                i + 1,
                track,
                player.is_in_playlist(track),
                player.is_in_favorites(track),
            )
        })
        .collect();
    format!("[{kind}]\n{}", rows.join("\n"))
}

/// Now-playing line with progress and volume
pub fn status(player: &Player) -> String {
    let marker = match player.state() {
        PlaybackState::Idle => "-",
        PlaybackState::Loading => "~",
        PlaybackState::Playing => ">",
        PlaybackState::Paused => "=",
    };
    let now = player.now_playing();
    let progress = player.status();

    format!(
        "{marker} {} - {}  {} / {} ({:.0}%)  {}",
        now.title,
        now.artist,
        format_clock(progress.current_time),
        progress.duration.map_or_else(|| "-:--".to_string(), format_clock),
        progress.progress_fraction() * 100.0,
        volume(player.volume())
    )
}

pub fn volume(volume: &Volume) -> String {
    let icon = match volume.icon_level() {
        VolumeLevel::Muted => "muted",
        VolumeLevel::Low => "vol-",
        VolumeLevel::High => "vol+",
    };
    format!("{icon} {:.0}%", volume.level() * 100.0)
}

/// Line announcing an event, if it is worth showing
pub fn event(event: &PlayerEvent) -> Option<String> {
    match event {
        PlayerEvent::TrackChanged { track } => {
            Some(format!("Now playing: {} - {}", track.title, track.artist))
        }
        PlayerEvent::NowPlayingCleared => Some("Stopped".to_string()),
        PlayerEvent::StateChanged {
            state: PlaybackState::Paused,
        } => Some("Paused".to_string()),
        PlayerEvent::SearchResultsChanged { count } => Some(format!("{count} results")),
        PlayerEvent::PlaylistChanged { length } => Some(format!("Playlist: {length} tracks")),
        PlayerEvent::FavoriteToggled {
            track, is_favorite, ..
        } => Some(if *is_favorite {
            format!("Added to favorites: {}", track.title)
        } else {
            format!("Removed from favorites: {}", track.title)
        }),
        PlayerEvent::VolumeChanged { volume, is_muted } => Some(if *is_muted {
            "Muted".to_string()
        } else {
            format!("Volume {:.0}%", volume * 100.0)
        }),
        PlayerEvent::Error { message, .. } => Some(format!("Error: {message}")),
        PlayerEvent::StateChanged { .. }
        | PlayerEvent::PositionUpdate { .. }
        | PlayerEvent::DurationChanged { .. }
        | PlayerEvent::TabChanged { .. } => None,
    }
}
