//! Audio output seam
//!
//! The sink is the platform primitive that accepts a stream URL and renders
//! it. It reports its lifecycle back as [`SinkEvent`]s, which the front-end
//! forwards to [`crate::Player::handle_sink_event`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sink-level failure
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink refused to start (e.g. autoplay restrictions)
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// The loaded source cannot be rendered
    #[error("Unsupported source: {0}")]
    Unsupported(String),
}

/// Audio output trait
///
/// Implementations are expected to be cheap, non-blocking calls; decoding
/// and buffering happen on the sink's own schedule.
pub trait AudioSink: Send {
    /// Replace the current source with `url`, stopped at position 0
    fn load(&mut self, url: &str);

    /// Start or resume rendering the loaded source
    fn play(&mut self) -> Result<(), SinkError>;

    /// Pause rendering, keeping the position
    fn pause(&mut self);

    /// Stop rendering and unload the source
    fn stop(&mut self);

    /// Move to `position` seconds into the source
    fn seek(&mut self, position: f64);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);
}

/// Lifecycle events emitted by a sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SinkEvent {
    /// Playback position moved
    TimeUpdate {
        /// Position in seconds
        position: f64,
    },

    /// Source metadata is available
    MetadataLoaded {
        /// Track length in seconds
        duration: f64,
    },

    /// The source played to its end
    Ended,
}
