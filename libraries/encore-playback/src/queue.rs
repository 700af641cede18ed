//! Cyclic playback queue
//!
//! Ordered items plus a cursor. Navigation wraps in both directions; there is
//! no end-of-queue state.

use encore_core::MediaItem;

/// Ordered queue with a cursor
///
/// Structure:
/// ```text
///            cursor
///              v
///   [ A ]  [ B ]  [ C ]
///     ^-----------------+  next() past C wraps to A
/// ```
///
/// Invariant: `cursor < len()` whenever the queue is non-empty, `cursor == 0`
/// when it is empty.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Items in play order
    items: Vec<MediaItem>,

    /// Index of the current item
    cursor: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue holding a single item
    pub fn singleton(item: MediaItem) -> Self {
        Self {
            items: vec![item],
            cursor: 0,
        }
    }

    /// Replace all items and reset the cursor to the head
    pub fn replace(&mut self, items: Vec<MediaItem>) {
        self.items = items;
        self.cursor = 0;
    }

    /// Move the cursor forward one item, wrapping past the end
    ///
    /// Returns the new current item, or `None` (without moving) if the queue is empty.
    pub fn advance(&mut self) -> Option<&MediaItem> {
        if self.items.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.items.len();
        self.items.get(self.cursor)
    }

    /// Move the cursor back one item, wrapping before the start
    ///
    /// Returns the new current item, or `None` (without moving) if the queue is empty.
    pub fn retreat(&mut self) -> Option<&MediaItem> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len();
        self.cursor = (self.cursor + len - 1) % len;
        self.items.get(self.cursor)
    }

    /// Item under the cursor
    pub fn current(&self) -> Option<&MediaItem> {
        self.items.get(self.cursor)
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All items in play order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
