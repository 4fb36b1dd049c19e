//! Circular previous/next navigation over the playlist
//!
//! Navigation never terminates while the playlist is non-empty: stepping
//! past either end wraps around. A current track that is not in the
//! playlist (played from search results or favorites) navigates to the
//! first entry in both directions.

use cloudtune_core::{Track, TrackKey};

/// Index of `current` in `playlist`
pub fn position(playlist: &[Track], current: &TrackKey) -> Option<usize> {
    playlist.iter().position(|track| track.matches(current))
}

/// Track after `current`, wrapping to the start
pub fn next<'a>(playlist: &'a [Track], current: Option<&TrackKey>) -> Option<&'a Track> {
    step(playlist, current, |index, len| (index + 1) % len)
}

/// Track before `current`, wrapping to the end
pub fn previous<'a>(playlist: &'a [Track], current: Option<&TrackKey>) -> Option<&'a Track> {
    step(playlist, current, |index, len| (index + len - 1) % len)
}

/// Track that takes over after the entry at `removed_index` was removed
///
/// `playlist` is the post-removal list, so the entry that followed the
/// removed one now sits at `removed_index`; removing the last entry wraps
/// to the first.
pub fn after_removal(playlist: &[Track], removed_index: usize) -> Option<&Track> {
    if playlist.is_empty() {
        return None;
    }
    playlist.get(removed_index % playlist.len())
}

fn step<'a>(
    playlist: &'a [Track],
    current: Option<&TrackKey>,
    advance: impl Fn(usize, usize) -> usize,
) -> Option<&'a Track> {
    if playlist.is_empty() {
        return None;
    }

    match current.and_then(|key| position(playlist, key)) {
        Some(index) => playlist.get(advance(index, playlist.len())),
        None => playlist.first(),
    }
}
