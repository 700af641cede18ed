//! Media handle integration tests
//!
//! Verifies that transitions drive the attached element, that failures surface
//! as health/events instead of errors, and that late results from superseded
//! loads are ignored.

use encore_core::{MediaItem, MediaKind};
use encore_playback::{
    MediaHandle, PlaybackError, PlaybackEvent, PlaybackHealth, PlaybackQueue, PlaybackState,
    Result,
};
use std::sync::{Arc, Mutex};
use std::thread;
use url::Url;

// ===== Test Helpers =====

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetSource(String),
    Play,
    Pause,
}

/// Handle that records every call and can be told to fail `play`
#[derive(Clone, Default)]
struct RecordingHandle {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_play: Arc<Mutex<bool>>,
}

impl RecordingHandle {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn set_fail_play(&self, fail: bool) {
        *self.fail_play.lock().unwrap() = fail;
    }
}

impl MediaHandle for RecordingHandle {
    fn set_source(&mut self, url: &Url) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::SetSource(url.to_string()));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Play);
        if *self.fail_play.lock().unwrap() {
            return Err(PlaybackError::media_handle("NotAllowedError: autoplay blocked"));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Pause);
        Ok(())
    }
}

fn song(id: &str) -> MediaItem {
    MediaItem::new(
        MediaKind::Song,
        id,
        &format!("https://cdn.example.com/{}.mp3", id),
        format!("Title {}", id),
        "Artist",
    )
    .unwrap()
}

// ===== Tests =====

#[test]
fn test_play_media_sets_source_and_plays() {
    let handle = RecordingHandle::default();
    let mut player = PlaybackQueue::default();
    player.attach_handle(Box::new(handle.clone()));

    let queue = vec![song("a"), song("b")];
    player.play_media(queue[0].clone(), queue);
    player.next();

    assert_eq!(
        handle.calls(),
        vec![
            Call::SetSource("https://cdn.example.com/a.mp3".to_string()),
            Call::Play,
            Call::SetSource("https://cdn.example.com/b.mp3".to_string()),
            Call::Play,
        ]
    );
    assert_eq!(player.health(), &PlaybackHealth::Started);
}

#[test]
fn test_without_handle_state_still_changes() {
    let mut player = PlaybackQueue::default();
    player.play_media(song("a"), Vec::new());

    assert!(!player.has_handle());
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.health(), &PlaybackHealth::Unknown);
}

#[test]
fn test_play_failure_is_reported_as_event() {
    let handle = RecordingHandle::default();
    handle.set_fail_play(true);

    let mut player = PlaybackQueue::default();
    player.attach_handle(Box::new(handle.clone()));
    player.play_media(song("a"), Vec::new());

    assert_eq!(player.current().unwrap().id.as_str(), "a");
    match player.health() {
        PlaybackHealth::Failed(message) => assert!(message.contains("autoplay blocked")),
        other => panic!("unexpected health {:?}", other),
    }

    let failures: Vec<PlaybackEvent> = player
        .drain_events()
        .into_iter()
        .filter(PlaybackEvent::is_failure)
        .collect();
    assert_eq!(failures.len(), 1);

    // Recovery on the next transition
    handle.set_fail_play(false);
    player.next();
    assert_eq!(player.health(), &PlaybackHealth::Started);
}

#[test]
fn test_stop_pauses_handle() {
    let handle = RecordingHandle::default();
    let mut player = PlaybackQueue::default();
    player.attach_handle(Box::new(handle.clone()));
    player.play_media(song("a"), Vec::new());

    player.stop();

    assert_eq!(handle.calls().last(), Some(&Call::Pause));
    assert_eq!(player.state(), PlaybackState::Idle);
}

#[test]
fn test_detach_stops_driving_handle() {
    let handle = RecordingHandle::default();
    let mut player = PlaybackQueue::default();
    player.attach_handle(Box::new(handle.clone()));
    player.play_media(song("a"), Vec::new());

    assert!(player.detach_handle().is_some());
    player.play_media(song("b"), Vec::new());

    assert_eq!(handle.calls().len(), 2);
}

#[test]
fn test_superseded_load_cannot_overwrite_health() {
    let mut player = PlaybackQueue::default();
    let queue = vec![song("a"), song("b"), song("c")];
    player.play_media(queue[0].clone(), queue);
    let slow_request = player.generation();

    // User skips twice before the first load resolves
    player.next();
    player.next();
    let latest = player.generation();

    assert!(!player.report_playback_outcome(
        slow_request,
        Err(PlaybackError::media_handle("aborted"))
    ));
    assert!(player.report_playback_outcome(latest, Ok(())));
    assert_eq!(player.health(), &PlaybackHealth::Started);
    assert!(!player.drain_events().iter().any(PlaybackEvent::is_failure));
}

#[test]
fn test_outcome_after_stop_is_dropped() {
    let mut player = PlaybackQueue::default();
    player.play_media(song("a"), Vec::new());
    let generation = player.generation();

    player.stop();

    assert!(!player.report_playback_outcome(generation, Ok(())));
    assert!(!player.report_playback_outcome(player.generation(), Ok(())));
}

#[test]
fn test_shared_queue_serializes_transitions() {
    let shared = PlaybackQueue::shared(Default::default());
    {
        let mut player = shared.lock().unwrap();
        let queue: Vec<MediaItem> = (0..4).map(|i| song(&i.to_string())).collect();
        player.play_media(queue[0].clone(), queue);
    }

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..25 {
                    shared.lock().unwrap().next();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let player = shared.lock().unwrap();
    // 100 steps around a queue of 4 lands back on the head
    assert_eq!(player.cursor(), 0);
    assert_eq!(player.generation(), 101);
}
