//! Shared fixtures for player integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cloudtune_core::{CatalogLookup, SourceId, Track, TrackKey, TuneError};
use cloudtune_playback::{AudioSink, Player, PlayerConfig, SinkError};
use cloudtune_storage::{CollectionStore, MemoryStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory catalog with canned answers
#[derive(Default)]
pub struct FakeCatalog {
    results: Mutex<Option<Vec<Track>>>,
    urls: Mutex<HashMap<TrackKey, String>>,
    searches: Mutex<Vec<(String, Vec<SourceId>)>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer searches with `tracks`
    pub fn with_results(self, tracks: Vec<Track>) -> Self {
        *self.results.lock().unwrap() = Some(tracks);
        self
    }

    /// Resolve `track` to `url`
    pub fn with_url(self, track: &Track, url: &str) -> Self {
        self.urls
            .lock()
            .unwrap()
            .insert(track.key(), url.to_string());
        self
    }

    /// Resolve every track in `tracks` to `http://x/<id>.mp3`
    pub fn with_urls_for(self, tracks: &[Track]) -> Self {
        tracks.iter().fold(self, |catalog, track| {
            let url = stream_url_for(track);
            catalog.with_url(track, &url)
        })
    }

    pub fn searches(&self) -> Vec<(String, Vec<SourceId>)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogLookup for FakeCatalog {
    async fn search(&self, keyword: &str, sources: &[SourceId]) -> cloudtune_core::Result<Vec<Track>> {
        self.searches
            .lock()
            .unwrap()
            .push((keyword.to_string(), sources.to_vec()));

        self.results.lock().unwrap().clone().ok_or(TuneError::Catalog {
            status: 502,
            message: "Bad Gateway".to_string(),
        })
    }

    async fn stream_url(&self, key: &TrackKey) -> cloudtune_core::Result<String> {
        self.urls
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| TuneError::missing_stream_url(key))
    }
}

/// Calls observed by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Load(String),
    Play,
    Pause,
    Stop,
    Seek(f64),
    SetVolume(f32),
}

/// Sink that records every call into a shared log
#[derive(Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
    reject: Arc<Mutex<bool>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `play` calls fail
    pub fn reject_play(&self, reject: bool) {
        *self.reject.lock().unwrap() = reject;
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    /// URL of the most recent `load`
    pub fn loaded(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SinkCall::Load(url) => Some(url),
            _ => None,
        })
    }

    /// Last volume applied
    pub fn volume(&self) -> Option<f32> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SinkCall::SetVolume(volume) => Some(volume),
            _ => None,
        })
    }

    fn record(&self, call: SinkCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioSink for RecordingSink {
    fn load(&mut self, url: &str) {
        self.record(SinkCall::Load(url.to_string()));
    }

    fn play(&mut self) -> Result<(), SinkError> {
        self.record(SinkCall::Play);
        if *self.reject.lock().unwrap() {
            return Err(SinkError::Rejected("not allowed".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.record(SinkCall::Pause);
    }

    fn stop(&mut self) {
        self.record(SinkCall::Stop);
    }

    fn seek(&mut self, position: f64) {
        self.record(SinkCall::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(SinkCall::SetVolume(volume));
    }
}

pub fn track(id: &str, source: SourceId) -> Track {
    Track::new(id, source, format!("Song {id}"), "Artist")
}

/// `n` QQ tracks with ids `t0..t{n-1}`
pub fn tracks(n: usize) -> Vec<Track> {
    (0..n).map(|i| track(&format!("t{i}"), SourceId::QQ)).collect()
}

pub fn stream_url_for(track: &Track) -> String {
    format!("http://x/{}.mp3", track.id)
}

/// Player over a fresh in-memory store
pub fn player(catalog: FakeCatalog) -> (Player, RecordingSink, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (player, sink) = player_on(catalog, store.clone());
    (player, sink, store)
}

/// Player over an existing store
pub fn player_on(catalog: FakeCatalog, store: Arc<MemoryStore>) -> (Player, RecordingSink) {
    let sink = RecordingSink::new();
    let player = Player::new(
        PlayerConfig::default(),
        CollectionStore::new(store),
        Arc::new(catalog),
        Box::new(sink.clone()),
    );
    (player, sink)
}

/// Player whose playlist holds `playlist`, with every entry resolvable
pub async fn player_with_playlist(playlist: &[Track]) -> (Player, RecordingSink) {
    let (mut player, sink, _) = player(FakeCatalog::new().with_urls_for(playlist));
    for track in playlist {
        player.add_to_playlist(track.clone()).await;
    }
    player.drain_events();
    (player, sink)
}
