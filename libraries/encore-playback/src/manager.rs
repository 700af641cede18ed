//! Playback queue - core orchestration
//!
//! Coordinates the queue, the current item, the media handle and UI events

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    handle::MediaHandle,
    queue::Queue,
    types::{PlaybackConfig, PlaybackHealth, PlaybackSnapshot, PlaybackState},
};
use encore_core::MediaItem;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Playback queue shared across threads
///
/// The queue itself has no internal locking; callers that add threads (a
/// background prefetcher, an event pump) serialize transitions through this mutex.
pub type SharedPlaybackQueue = Arc<Mutex<PlaybackQueue>>;

/// Central playback state
///
/// Owns the current item, the queue with its cursor, and the optional media handle.
///
/// State machine:
/// - **Idle** (`current() == None`) moves to **Playing** only through
///   [`play_media`](Self::play_media) or [`play_from`](Self::play_from).
/// - `next` / `previous` are self-transitions within Playing.
/// - [`stop`](Self::stop) returns to Idle, keeping the queue for display.
///
/// While Playing with a non-empty queue, `queue()[cursor()]` is the current item,
/// provided callers honour the `play_media` precondition.
pub struct PlaybackQueue {
    // State
    current: Option<MediaItem>,
    queue: Queue,

    // UI affordance
    expanded: bool,

    // Settings
    autoplay: bool,

    // Platform element
    handle: Option<Box<dyn MediaHandle>>,

    // Bumped on every transition so late handle results can be recognised as stale
    generation: u64,
    health: PlaybackHealth,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackQueue {
    /// Create new playback queue
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            current: None,
            queue: Queue::new(),
            expanded: config.expanded,
            autoplay: config.autoplay,
            handle: None,
            generation: 0,
            health: PlaybackHealth::Unknown,
            pending_events: Vec::new(),
        }
    }

    /// Create a playback queue wrapped for sharing between threads
    pub fn shared(config: PlaybackConfig) -> SharedPlaybackQueue {
        Arc::new(Mutex::new(Self::new(config)))
    }

    // ===== Media Handle =====

    /// Attach the platform media element
    ///
    /// Replaces any previously attached handle. The current item is not reloaded;
    /// the new handle is driven from the next transition on.
    pub fn attach_handle(&mut self, handle: Box<dyn MediaHandle>) {
        self.handle = Some(handle);
    }

    /// Detach and return the media element
    pub fn detach_handle(&mut self) -> Option<Box<dyn MediaHandle>> {
        self.handle.take()
    }

    /// Whether a media element is attached
    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    // ===== Transitions =====

    /// Play an item, optionally replacing the queue
    ///
    /// With an empty `queue` the queue collapses to `[item]`. Otherwise `queue`
    /// becomes the new queue and the cursor resets to 0.
    ///
    /// Precondition: `item` is `queue[0]`. This is not enforced; a mismatch is
    /// logged and `current()` will differ from `queue()[cursor()]` until the next
    /// `next`/`previous`. Use [`play_from`](Self::play_from) to get the invariant by
    /// construction.
    pub fn play_media(&mut self, item: MediaItem, queue: Vec<MediaItem>) {
        if queue.is_empty() {
            self.queue = Queue::singleton(item.clone());
        } else {
            if !queue[0].same_media(&item) {
                warn!(
                    "play_media: item {} is not the queue head ({} items), cursor will not point at it",
                    item.id,
                    queue.len()
                );
            }
            self.queue.replace(queue);
        }

        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.set_current(item);
    }

    /// Play `queue[index]` with the queue rotated so that it starts at that item
    ///
    /// Mirrors clicking a row in a list: `[a, b, c, d]` with index 2 becomes
    /// `[c, d, a, b]`, so `next` continues through the list and wraps around.
    pub fn play_from(&mut self, mut queue: Vec<MediaItem>, index: usize) -> Result<()> {
        if queue.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if index >= queue.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        queue.rotate_left(index);
        let item = queue[0].clone();
        self.play_media(item, queue);
        Ok(())
    }

    /// Skip to next item, wrapping past the end
    ///
    /// No-op while Idle or when the queue is empty.
    pub fn next(&mut self) {
        if self.current.is_none() {
            debug!("next() ignored: nothing loaded");
            return;
        }
        if let Some(item) = self.queue.advance().cloned() {
            self.set_current(item);
        }
    }

    /// Go to previous item, wrapping before the start
    ///
    /// No-op while Idle or when the queue is empty.
    pub fn previous(&mut self) {
        if self.current.is_none() {
            debug!("previous() ignored: nothing loaded");
            return;
        }
        if let Some(item) = self.queue.retreat().cloned() {
            self.set_current(item);
        }
    }

    /// Stop playback
    ///
    /// Clears the current item (but not the queue) and pauses the handle.
    pub fn stop(&mut self) {
        if self.current.take().is_none() {
            return;
        }

        self.generation += 1;
        self.health = PlaybackHealth::Unknown;

        if let Some(handle) = self.handle.as_mut() {
            if let Err(e) = handle.pause() {
                warn!("Failed to pause media handle on stop: {}", e);
            }
        }

        self.pending_events.push(PlaybackEvent::StateChanged {
            state: PlaybackState::Idle,
        });
    }

    /// Flip the expanded-player flag
    pub fn toggle_expand(&mut self) {
        self.expanded = !self.expanded;
        self.pending_events.push(PlaybackEvent::ExpandedChanged {
            expanded: self.expanded,
        });
    }

    /// Record the asynchronous outcome of a play request
    ///
    /// `generation` is the value of [`generation()`](Self::generation) when the
    /// request was issued. Outcomes from superseded transitions are dropped.
    /// Returns whether the outcome was applied.
    pub fn report_playback_outcome(&mut self, generation: u64, outcome: Result<()>) -> bool {
        if generation != self.generation || self.current.is_none() {
            debug!(
                "Dropping playback outcome for generation {} (current {})",
                generation, self.generation
            );
            return false;
        }

        match outcome {
            Ok(()) => self.health = PlaybackHealth::Started,
            Err(e) => self.record_failure(&e),
        }
        true
    }

    // ===== State Queries =====

    /// Get playback state
    pub fn state(&self) -> PlaybackState {
        if self.current.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// Get the currently loaded item
    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    /// Get queue items in play order
    pub fn queue(&self) -> &[MediaItem] {
        self.queue.items()
    }

    /// Get the cursor into `queue()`
    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    /// Get queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the expanded player is shown
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Monotonic transition counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Outcome of the latest attempt to start the current item
    pub fn health(&self) -> &PlaybackHealth {
        &self.health
    }

    /// Copy of the renderable state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            current: self.current.clone(),
            queue: self.queue.items().to_vec(),
            cursor: self.queue.cursor(),
            expanded: self.expanded,
            generation: self.generation,
            health: self.health.clone(),
        }
    }

    // ===== Events =====

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn set_current(&mut self, item: MediaItem) {
        let was_idle = self.current.is_none();
        let previous_item_id = self.current.as_ref().map(|prev| prev.id.clone());

        self.generation += 1;
        self.health = PlaybackHealth::Unknown;

        self.pending_events.push(PlaybackEvent::TrackChanged {
            kind: item.kind,
            item_id: item.id.clone(),
            previous_item_id,
            cursor: self.queue.cursor(),
            generation: self.generation,
        });
        if was_idle {
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: PlaybackState::Playing,
            });
        }

        self.current = Some(item);
        self.load_current();
    }

    /// Hand the current item to the media handle (fire-and-forget)
    fn load_current(&mut self) {
        if !self.autoplay {
            return;
        }
        let (Some(handle), Some(item)) = (self.handle.as_mut(), self.current.as_ref()) else {
            return;
        };

        let started = handle
            .set_source(&item.source_url)
            .and_then(|()| handle.play());

        match started {
            Ok(()) => self.health = PlaybackHealth::Started,
            Err(e) => self.record_failure(&e),
        }
    }

    fn record_failure(&mut self, error: &PlaybackError) {
        let message = error.to_string();
        warn!(
            "Playback failed for generation {}: {}",
            self.generation, message
        );
        self.health = PlaybackHealth::Failed(message.clone());
        self.pending_events.push(PlaybackEvent::PlaybackFailed {
            generation: self.generation,
            message,
        });
    }
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl std::fmt::Debug for PlaybackQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackQueue")
            .field("current", &self.current.as_ref().map(|item| &item.id))
            .field("queue_len", &self.queue.len())
            .field("cursor", &self.queue.cursor())
            .field("expanded", &self.expanded)
            .field("generation", &self.generation)
            .field("has_handle", &self.handle.is_some())
            .finish()
    }
}
