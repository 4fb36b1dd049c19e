//! Simulated audio sink
//!
//! The terminal has no audio device, so the shell plays through a sink that
//! only keeps time: every loaded stream lasts a fixed number of seconds and
//! the shell advances it from a ticker. Lifecycle events come out of
//! [`ClockHandle::tick`] the way a real sink would report them.

use cloudtune_playback::{AudioSink, SinkError, SinkEvent};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ClockState {
    url: Option<String>,
    playing: bool,
    position: f64,
    volume: f32,
    metadata_sent: bool,
}

/// Sink half, owned by the player
pub struct ClockSink {
    state: Arc<Mutex<ClockState>>,
    track_secs: f64,
}

/// Driver half, kept by the shell
#[derive(Clone)]
pub struct ClockHandle {
    state: Arc<Mutex<ClockState>>,
    track_secs: f64,
}

impl ClockSink {
    /// Create a sink whose tracks all last `track_secs`
    pub fn new(track_secs: f64) -> (Self, ClockHandle) {
        let state = Arc::new(Mutex::new(ClockState::default()));
        let handle = ClockHandle {
            state: Arc::clone(&state),
            track_secs,
        };
        (Self { state, track_secs }, handle)
    }

    fn state(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioSink for ClockSink {
    fn load(&mut self, url: &str) {
        let mut state = self.state();
        state.url = Some(url.to_string());
        state.playing = false;
        state.position = 0.0;
        state.metadata_sent = false;
    }

    fn play(&mut self) -> Result<(), SinkError> {
        let mut state = self.state();
        if state.url.is_none() {
            return Err(SinkError::Unsupported("nothing loaded".to_string()));
        }
        // Playing an ended stream starts it over
        if state.position >= self.track_secs {
            state.position = 0.0;
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state().playing = false;
    }

    fn stop(&mut self) {
        let mut state = self.state();
        state.url = None;
        state.playing = false;
        state.position = 0.0;
    }

    fn seek(&mut self, position: f64) {
        self.state().position = position.max(0.0);
    }

    fn set_volume(&mut self, volume: f32) {
        self.state().volume = volume;
    }
}

impl ClockHandle {
    /// Advance the clock by `elapsed` seconds
    pub fn tick(&self, elapsed: f64) -> Vec<SinkEvent> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut events = Vec::new();

        if state.url.is_none() {
            return events;
        }

        if !state.metadata_sent {
            state.metadata_sent = true;
            events.push(SinkEvent::MetadataLoaded {
                duration: self.track_secs,
            });
        }

        if state.playing {
            state.position = (state.position + elapsed).min(self.track_secs);
            events.push(SinkEvent::TimeUpdate {
                position: state.position,
            });

            if state.position >= self.track_secs {
                state.playing = false;
                events.push(SinkEvent::Ended);
            }
        }

        events
    }

    /// URL currently loaded
    pub fn loaded(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .url
            .clone()
    }

    /// Last volume applied by the player
    pub fn volume(&self) -> f32 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).volume
    }
}
