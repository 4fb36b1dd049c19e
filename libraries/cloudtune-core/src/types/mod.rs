mod ids;
mod track;

pub use ids::SourceId;
pub use track::{Track, TrackKey};
