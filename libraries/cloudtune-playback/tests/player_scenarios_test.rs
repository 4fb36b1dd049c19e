//! End-to-end player scenarios over fake catalog, sink and store

mod common;

use cloudtune_core::{SourceId, Track, TrackKey};
use cloudtune_playback::{
    Completion, ErrorKind, ListKind, PlaybackState, PlayerError, PlayerEvent, SinkEvent,
};
use cloudtune_storage::{KeyValueStore, FAVORITES_KEY, PLAYLIST_KEY};
use common::{
    player, player_on, player_with_playlist, stream_url_for, track, tracks, FakeCatalog, SinkCall,
};

fn nocturne() -> Track {
    Track::new("1", SourceId::QQ, "夜曲", "周杰伦")
}

// ===== Search =====

#[tokio::test]
async fn search_replaces_results_and_shows_them() {
    let catalog = FakeCatalog::new().with_results(vec![nocturne()]);
    let (mut player, _, _) = player(catalog);

    let count = player
        .search("夜曲", &[SourceId::QQ, SourceId::NETEASE])
        .await
        .unwrap();

    assert_eq!(count, Some(1));
    assert_eq!(player.library().search_results(), &[nocturne()]);
    assert_eq!(player.library().active_tab(), ListKind::SearchResults);

    let events = player.drain_events();
    assert!(events.contains(&PlayerEvent::SearchResultsChanged { count: 1 }));
    assert!(events.contains(&PlayerEvent::TabChanged {
        tab: ListKind::SearchResults
    }));
}

#[tokio::test]
async fn search_without_sources_is_rejected() {
    let catalog = FakeCatalog::new().with_results(vec![nocturne()]);
    let (mut player, _, _) = player(catalog);
    player.search("夜曲", &[SourceId::QQ]).await.unwrap();

    let result = player.search("other", &[]).await;

    assert!(matches!(result, Err(PlayerError::EmptySelection)));
    assert_eq!(result.unwrap_err().kind(), ErrorKind::EmptySelection);
    assert_eq!(player.library().search_results().len(), 1);
}

#[tokio::test]
async fn blank_keyword_never_reaches_the_catalog() {
    let (mut player, _, _) = player(FakeCatalog::new().with_results(vec![nocturne()]));

    assert_eq!(player.search("   ", &[SourceId::QQ]).await.unwrap(), None);
    assert!(player.library().search_results().is_empty());
    assert!(!player.has_pending_events());
}

#[tokio::test]
async fn failed_search_keeps_previous_results() {
    let catalog = FakeCatalog::new();
    let (mut player, _, _) = player(catalog);

    let result = player.search("夜曲", &[SourceId::KUWO]).await;

    assert!(matches!(result, Err(PlayerError::Lookup(_))));
    assert!(player.library().search_results().is_empty());
    assert_eq!(player.library().active_tab(), ListKind::Playlist);
}

#[test]
fn stale_search_response_is_discarded() {
    let (mut player, _, _) = player(FakeCatalog::new());

    let first = player.begin_search("first", &[SourceId::QQ]).unwrap().unwrap();
    let second = player.begin_search("second", &[SourceId::QQ]).unwrap().unwrap();

    let newer = vec![track("new", SourceId::QQ)];
    assert_eq!(
        player.finish_search(second, Ok(newer)).unwrap(),
        Completion::Applied
    );

    let older = vec![track("old", SourceId::QQ), track("old2", SourceId::QQ)];
    assert_eq!(
        player.finish_search(first, Ok(older)).unwrap(),
        Completion::Superseded
    );
    assert_eq!(player.library().search_results()[0].id, "new");
}

// ===== Play =====

#[tokio::test]
async fn play_loads_stream_and_starts_sink() {
    let catalog = FakeCatalog::new().with_url(&nocturne(), "http://x/a.mp3");
    let (mut player, sink, _) = player(catalog);

    player.play(nocturne()).await.unwrap();

    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.current_track(), Some(&nocturne()));
    assert_eq!(player.now_playing().title, "夜曲");
    assert_eq!(sink.loaded().as_deref(), Some("http://x/a.mp3"));
    assert_eq!(sink.calls().last(), Some(&SinkCall::Play));

    let states: Vec<_> = player
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PlayerEvent::StateChanged { state } => Some(state),
            _ => None,
        })
        .collect();
    assert_eq!(states, vec![PlaybackState::Loading, PlaybackState::Playing]);
}

#[tokio::test]
async fn missing_stream_url_keeps_current_track() {
    let playing = track("ok", SourceId::QQ);
    let catalog = FakeCatalog::new().with_url(&playing, "http://x/ok.mp3");
    let (mut player, sink, _) = player(catalog);
    player.play(playing.clone()).await.unwrap();
    player.drain_events();

    let result = player.play(nocturne()).await;

    assert!(matches!(result, Err(PlayerError::Playback(_))));
    assert_eq!(player.current_track(), Some(&playing));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(sink.loaded().as_deref(), Some("http://x/ok.mp3"));
    assert!(player
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::Error { kind: ErrorKind::Playback, .. })));
}

#[tokio::test]
async fn failed_first_play_returns_to_idle() {
    let (mut player, _, _) = player(FakeCatalog::new());

    assert!(player.play(nocturne()).await.is_err());
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(player.current_track().is_none());
}

#[tokio::test]
async fn sink_rejection_pauses_on_committed_track() {
    let catalog = FakeCatalog::new().with_url(&nocturne(), "http://x/a.mp3");
    let (mut player, sink, _) = player(catalog);
    sink.reject_play(true);

    assert!(player.play(nocturne()).await.is_err());
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.current_track(), Some(&nocturne()));

    sink.reject_play(false);
    player.toggle_play_pause().unwrap();
    assert_eq!(player.state(), PlaybackState::Playing);
}

#[test]
fn stale_stream_url_is_discarded() {
    let (mut player, sink, _) = player(FakeCatalog::new());
    let first = track("a", SourceId::QQ);
    let second = track("b", SourceId::QQ);

    let first_ticket = player.begin_play(first.clone());
    let second_ticket = player.begin_play(second.clone());

    player
        .finish_play(second_ticket, Ok(stream_url_for(&second)))
        .unwrap();
    let completion = player
        .finish_play(first_ticket, Ok(stream_url_for(&first)))
        .unwrap();

    assert_eq!(completion, Completion::Superseded);
    assert_eq!(player.current_track(), Some(&second));
    assert_eq!(sink.loaded(), Some(stream_url_for(&second)));
}

#[tokio::test]
async fn toggle_play_pause_round_trip() {
    let catalog = FakeCatalog::new().with_url(&nocturne(), "http://x/a.mp3");
    let (mut player, sink, _) = player(catalog);
    player.play(nocturne()).await.unwrap();

    player.toggle_play_pause().unwrap();
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(sink.calls().last(), Some(&SinkCall::Pause));

    player.toggle_play_pause().unwrap();
    assert_eq!(player.state(), PlaybackState::Playing);
    assert!(player.status().is_playing);
}

// ===== Playlist =====

#[tokio::test]
async fn add_is_idempotent_and_first_add_autoplays() {
    let song = nocturne();
    let catalog = FakeCatalog::new().with_url(&song, "http://x/a.mp3");
    let (mut player, sink, store) = player(catalog);

    assert!(player.add_to_playlist(song.clone()).await);
    assert_eq!(player.current_track(), Some(&song));
    assert_eq!(player.state(), PlaybackState::Playing);
    let persisted = store.get(PLAYLIST_KEY).unwrap();

    assert!(!player.add_to_playlist(song.clone()).await);
    assert_eq!(player.library().playlist().len(), 1);
    assert_eq!(store.get(PLAYLIST_KEY).unwrap(), persisted);
    assert_eq!(
        sink.calls()
            .iter()
            .filter(|c| matches!(c, SinkCall::Load(_)))
            .count(),
        1
    );
}

#[tokio::test]
async fn later_adds_do_not_interrupt_playback() {
    let list = tracks(2);
    let (player, _) = player_with_playlist(&list).await;

    assert_eq!(player.current_track(), Some(&list[0]));
    assert_eq!(player.library().playlist(), list.as_slice());
}

#[tokio::test]
async fn autoplay_failure_is_reported_but_track_is_added() {
    let (mut player, _, _) = player(FakeCatalog::new());

    assert!(player.add_to_playlist(nocturne()).await);
    assert_eq!(player.library().playlist().len(), 1);
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(player
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::Error { .. })));
}

#[tokio::test]
async fn removing_only_current_entry_stops() {
    let list = tracks(1);
    let (mut player, sink) = player_with_playlist(&list).await;

    assert!(player.remove_from_playlist(&list[0].key()).await);

    assert!(player.current_track().is_none());
    assert!(player.library().playlist().is_empty());
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.now_playing().title, "Not playing");
    assert_eq!(player.now_playing().artist, "Unknown artist");
    assert_eq!(sink.calls().last(), Some(&SinkCall::Stop));
}

#[tokio::test]
async fn removing_current_entry_plays_the_following_one() {
    let list = tracks(4);
    let (mut player, sink) = player_with_playlist(&list).await;
    player.play(list[1].clone()).await.unwrap();

    player.remove_from_playlist(&list[1].key()).await;

    assert_eq!(player.current_track(), Some(&list[2]));
    assert_eq!(sink.loaded(), Some(stream_url_for(&list[2])));
}

#[tokio::test]
async fn removing_current_last_entry_wraps_to_first() {
    let list = tracks(3);
    let (mut player, _) = player_with_playlist(&list).await;
    player.play(list[2].clone()).await.unwrap();

    player.remove_from_playlist(&list[2].key()).await;

    assert_eq!(player.current_track(), Some(&list[0]));
}

#[tokio::test]
async fn removing_other_entry_keeps_playing() {
    let list = tracks(3);
    let (mut player, _) = player_with_playlist(&list).await;

    assert!(player.remove_from_playlist(&list[2].key()).await);
    assert!(!player
        .remove_from_playlist(&TrackKey::new("missing", SourceId::QQ))
        .await);

    assert_eq!(player.current_track(), Some(&list[0]));
    assert_eq!(player.state(), PlaybackState::Playing);
}

// ===== Navigation =====

#[tokio::test]
async fn next_and_previous_wrap() {
    let list = tracks(3);
    let (mut player, _) = player_with_playlist(&list).await;

    assert_eq!(player.previous().await.unwrap(), Completion::Applied);
    assert_eq!(player.current_track(), Some(&list[2]));

    player.next().await.unwrap();
    assert_eq!(player.current_track(), Some(&list[0]));
}

#[tokio::test]
async fn next_without_current_track_is_ignored() {
    let (mut player, _, _) = player(FakeCatalog::new());
    assert_eq!(player.next().await.unwrap(), Completion::Ignored);
    assert_eq!(player.previous().await.unwrap(), Completion::Ignored);
}

#[tokio::test]
async fn track_outside_playlist_navigates_to_first() {
    let list = tracks(3);
    let outsider = track("outside", SourceId::NETEASE);
    let catalog = FakeCatalog::new()
        .with_urls_for(&list)
        .with_url(&outsider, "http://x/outside.mp3");
    let (mut player, _, _) = player(catalog);
    player.play(outsider).await.unwrap();
    for t in &list {
        player.add_to_playlist(t.clone()).await;
    }

    player.previous().await.unwrap();
    assert_eq!(player.current_track(), Some(&list[0]));
}

#[tokio::test]
async fn ended_advances_to_next_entry() {
    let list = tracks(2);
    let (mut player, _) = player_with_playlist(&list).await;

    player.handle_sink_event(SinkEvent::Ended).await;
    assert_eq!(player.current_track(), Some(&list[1]));

    player.handle_sink_event(SinkEvent::Ended).await;
    assert_eq!(player.current_track(), Some(&list[0]));
    assert_eq!(player.state(), PlaybackState::Playing);
}

#[tokio::test]
async fn failed_advance_after_end_settles_paused() {
    let first = track("a", SourceId::QQ);
    let unplayable = track("b", SourceId::KUWO);
    let catalog = FakeCatalog::new().with_url(&first, "http://x/a.mp3");
    let (mut player, sink, _) = player(catalog);
    player.add_to_playlist(first.clone()).await;
    player.add_to_playlist(unplayable).await;
    player.drain_events();

    player.handle_sink_event(SinkEvent::Ended).await;

    assert_eq!(player.state(), PlaybackState::Paused);
    assert!(!player.status().is_playing);
    assert_eq!(player.current_track(), Some(&first));
    assert!(player
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlayerEvent::Error { kind: ErrorKind::Playback, .. })));

    // The first press resumes rather than pausing an ended sink
    player.toggle_play_pause().unwrap();
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(sink.calls().last(), Some(&SinkCall::Play));
}

#[test]
fn ticketed_advance_leaves_lookup_to_caller() {
    let list = tracks(2);
    let (mut player, _, _) = player(FakeCatalog::new().with_urls_for(&list));
    let edit = player.begin_add_to_playlist(list[0].clone());
    assert!(edit.changed);
    let ticket = edit.follow_up.expect("first add starts playback");
    assert_eq!(ticket.track(), &list[0]);
    player
        .finish_play(ticket, Ok(stream_url_for(&list[0])))
        .unwrap();
    assert!(player
        .begin_add_to_playlist(list[1].clone())
        .follow_up
        .is_none());

    let ticket = player.apply_sink_event(SinkEvent::Ended).expect("next entry");

    assert_eq!(ticket.track(), &list[1]);
    assert_eq!(player.state(), PlaybackState::Loading);
    assert_eq!(player.current_track(), Some(&list[0]));
    assert!(player.begin_next().is_some());
}

#[tokio::test]
async fn ended_with_empty_playlist_pauses() {
    let catalog = FakeCatalog::new().with_url(&nocturne(), "http://x/a.mp3");
    let (mut player, _, _) = player(catalog);
    player.play(nocturne()).await.unwrap();

    player.handle_sink_event(SinkEvent::Ended).await;

    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.current_track(), Some(&nocturne()));
    assert!(!player.status().is_playing);
}

#[tokio::test]
async fn sink_progress_is_tracked() {
    let catalog = FakeCatalog::new().with_url(&nocturne(), "http://x/a.mp3");
    let (mut player, _, _) = player(catalog);
    player.play(nocturne()).await.unwrap();

    player
        .handle_sink_event(SinkEvent::MetadataLoaded { duration: 200.0 })
        .await;
    player
        .handle_sink_event(SinkEvent::TimeUpdate { position: 50.0 })
        .await;

    assert_eq!(player.status().duration, Some(200.0));
    assert!((player.status().progress_fraction() - 0.25).abs() < 1e-9);
}

// ===== Favorites and volume =====

#[tokio::test]
async fn toggle_favorite_twice_restores_persisted_form() {
    let (mut player, _, store) = player(FakeCatalog::new());
    let existing = track("keep", SourceId::KUWO);
    player.toggle_favorite(&existing);
    let before = store.get(FAVORITES_KEY).unwrap();

    assert!(player.toggle_favorite(&nocturne()));
    assert!(player.is_in_favorites(&nocturne()));
    assert!(!player.toggle_favorite(&nocturne()));

    assert_eq!(store.get(FAVORITES_KEY).unwrap(), before);
    assert_eq!(player.library().favorites(), &[existing]);
}

#[tokio::test]
async fn collections_survive_restart() {
    let list = tracks(2);
    let (mut player, _, store) = player(FakeCatalog::new().with_urls_for(&list));
    for t in &list {
        player.add_to_playlist(t.clone()).await;
    }
    player.toggle_favorite(&list[1]);

    let (restarted, _) = player_on(FakeCatalog::new(), store);
    assert_eq!(restarted.library().playlist(), list.as_slice());
    assert!(restarted.is_in_favorites(&list[1]));
    assert!(restarted.current_track().is_none());
    assert_eq!(restarted.state(), PlaybackState::Idle);
}

#[test]
fn volume_is_clamped() {
    let (mut player, sink, _) = player(FakeCatalog::new());

    player.set_volume(-0.3);
    assert_eq!(player.volume().level(), 0.0);
    assert_eq!(sink.volume(), Some(0.0));

    player.set_volume(1.7);
    assert_eq!(player.volume().level(), 1.0);
}

#[test]
fn mute_restores_previous_or_default() {
    let (mut player, _, _) = player(FakeCatalog::new());
    player.set_volume(0.4);

    assert_eq!(player.toggle_mute(), 0.0);
    assert!((player.toggle_mute() - 0.4).abs() < f32::EPSILON);

    player.set_volume(0.0);
    assert!((player.toggle_mute() - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn find_resolves_list_entries() {
    let catalog = FakeCatalog::new().with_results(vec![nocturne()]);
    let (mut player, _, _) = player(catalog);
    player.search("夜曲", &[SourceId::QQ]).await.unwrap();

    let key = nocturne().key();
    assert_eq!(player.find(ListKind::SearchResults, &key), Some(&nocturne()));
    assert!(player.find(ListKind::Favorites, &key).is_none());

    player.select_tab(ListKind::Favorites);
    assert_eq!(player.library().active_tab(), ListKind::Favorites);
}
