//! Encore - Playback Queue
//!
//! Platform-agnostic tracking of "what is playing now, and what plays next".
//!
//! This crate provides:
//! - An ordered queue with a cursor and wraparound navigation
//! - A two-state machine (Idle, Playing) driven by `play_media`, `next`,
//!   `previous` and `stop`
//! - An optional media handle port (audio/video element or equivalent)
//! - Generation counting so late results from superseded loads are ignored
//! - Events for UI synchronization
//!
//! # Architecture
//!
//! `encore-playback` owns no I/O. The media element is supplied through the
//! [`MediaHandle`] trait and is driven fire-and-forget: a failing handle is
//! logged and reported as an event, never as an error from a transition.
//!
//! There is no global player. Construct a [`PlaybackQueue`] and pass it (or a
//! [`SharedPlaybackQueue`]) to whatever needs it.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use encore_core::{MediaItem, MediaKind};
//! use encore_playback::{PlaybackQueue, PlaybackState};
//!
//! let song = |id: &str| {
//!     MediaItem::new(
//!         MediaKind::Song,
//!         id,
//!         &format!("https://cdn.example.com/{}.mp3", id),
//!         "Title",
//!         "Artist",
//!     )
//!     .unwrap()
//! };
//!
//! let mut player = PlaybackQueue::default();
//! assert_eq!(player.state(), PlaybackState::Idle);
//!
//! let queue = vec![song("a"), song("b"), song("c")];
//! player.play_media(queue[0].clone(), queue);
//!
//! player.next();
//! assert_eq!(player.current().unwrap().id.as_str(), "b");
//!
//! player.previous();
//! player.previous();
//! assert_eq!(player.current().unwrap().id.as_str(), "c"); // wrapped
//! assert_eq!(player.cursor(), 2);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use encore_playback::{MediaHandle, PlaybackQueue, Result};
//! use url::Url;
//!
//! struct HtmlAudioElement {
//!     // ... platform-specific element
//! }
//!
//! impl MediaHandle for HtmlAudioElement {
//!     fn set_source(&mut self, url: &Url) -> Result<()> {
//!         // Point the element at the new source
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         // Start playback
//!         Ok(())
//!     }
//! }
//!
//! let mut player = PlaybackQueue::default();
//! player.attach_handle(Box::new(HtmlAudioElement { /* ... */ }));
//! ```

mod error;
mod events;
mod handle;
mod manager;
mod queue;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use handle::MediaHandle;
pub use manager::{PlaybackQueue, SharedPlaybackQueue};
pub use queue::Queue;
pub use types::{PlaybackConfig, PlaybackHealth, PlaybackSnapshot, PlaybackState};
