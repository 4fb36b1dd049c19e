/// Track domain type
use crate::types::SourceId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identity of a track: the pair (id, source)
///
/// The same numeric id can exist in several catalogs, so the source is
/// always part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    /// Track identifier inside its catalog
    pub id: String,

    /// Catalog the identifier belongs to
    pub source: SourceId,
}

impl TrackKey {
    /// Create a new key
    pub fn new(id: impl Into<String>, source: impl Into<SourceId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.id)
    }
}

/// Playable music item returned by a catalog
///
/// Title, artist, album and cover are display metadata only; two tracks are
/// the same entity iff [`Track::key`] matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier inside its catalog
    pub id: String,

    /// Catalog the track comes from
    pub source: SourceId,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub album: Option<String>,

    /// Cover art URL
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub cover: Option<String>,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        source: impl Into<SourceId>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            cover: None,
        }
    }

    /// Set the cover art URL
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Identity of this track
    pub fn key(&self) -> TrackKey {
        TrackKey::new(self.id.clone(), self.source.clone())
    }

    /// Whether this track has the given identity
    pub fn matches(&self, key: &TrackKey) -> bool {
        self.id == key.id && self.source == key.source
    }

    /// Whether two tracks are the same entity
    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id && self.source == other.source
    }
}

/// The backend omits or blanks optional strings interchangeably
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
