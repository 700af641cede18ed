//! `encore queue ...`

use anyhow::Context;
use clap::ValueEnum;
use encore_core::MediaItem;
use encore_playback::{MediaHandle, PlaybackQueue, PlaybackSnapshot};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Transport control
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
    Next,
    Prev,
    Toggle,
    Stop,
}

/// Media handle that only logs what a real element would do
struct LogHandle;

impl MediaHandle for LogHandle {
    fn set_source(&mut self, url: &Url) -> encore_playback::Result<()> {
        info!("Loading {}", url);
        Ok(())
    }

    fn play(&mut self) -> encore_playback::Result<()> {
        info!("Playing");
        Ok(())
    }

    fn pause(&mut self) -> encore_playback::Result<()> {
        info!("Paused");
        Ok(())
    }
}

/// Read a JSON array of media items
pub fn load_playlist(path: &Path) -> anyhow::Result<Vec<MediaItem>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid playlist {}", path.display()))
}

/// Start at `items[start]` and apply `steps`
pub fn run(items: Vec<MediaItem>, start: usize, steps: &[Step]) -> anyhow::Result<PlaybackSnapshot> {
    let mut player = PlaybackQueue::default();
    player.attach_handle(Box::new(LogHandle));
    player.play_from(items, start)?;

    for step in steps {
        match step {
            Step::Next => player.next(),
            Step::Prev => player.previous(),
            Step::Toggle => player.toggle_expand(),
            Step::Stop => player.stop(),
        }
    }

    for event in player.drain_events() {
        debug!(?event, "Playback event");
    }

    Ok(player.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::MediaKind;
    use encore_playback::PlaybackState;
    use std::io::Write;

    fn playlist() -> Vec<MediaItem> {
        ["a", "b", "c"]
            .iter()
            .map(|id| {
                MediaItem::new(
                    MediaKind::Song,
                    *id,
                    &format!("https://cdn.example.com/{}.mp3", id),
                    id.to_uppercase(),
                    "Artist",
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn next_wraps_around() {
        let snapshot = run(playlist(), 0, &[Step::Next, Step::Next, Step::Next]).unwrap();
        assert_eq!(snapshot.cursor, 0);
        assert_eq!(snapshot.current.unwrap().id.as_str(), "a");
    }

    #[test]
    fn start_index_rotates_queue() {
        let snapshot = run(playlist(), 2, &[Step::Next]).unwrap();
        let ids: Vec<&str> = snapshot.queue.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(snapshot.current.unwrap().id.as_str(), "a");
    }

    #[test]
    fn toggle_and_stop() {
        let snapshot = run(playlist(), 0, &[Step::Toggle, Step::Prev, Step::Stop]).unwrap();
        assert!(snapshot.expanded);
        assert_eq!(snapshot.state, PlaybackState::Idle);
        assert!(snapshot.current.is_none());
        assert_eq!(snapshot.cursor, 2);
    }

    #[test]
    fn empty_playlist_is_an_error() {
        assert!(run(Vec::new(), 0, &[]).is_err());
    }

    #[test]
    fn playlist_file_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&playlist()).unwrap()).unwrap();

        let loaded = load_playlist(file.path()).unwrap();
        assert_eq!(loaded, playlist());
    }

    #[test]
    fn relative_urls_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"kind":"song","id":"a","source_url":"/a.mp3","title":"A","artist_name":"X","artwork_url":null}}]"#
        )
        .unwrap();

        assert!(load_playlist(file.path()).is_err());
    }
}
