//! Playback Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - State changes (idle/playing)
//! - Track changes (every transition that changes the current item)
//! - Queue replacement
//! - Expanded-player toggles
//! - Playback-start failures reported by the media handle

use encore_core::{MediaId, MediaKind};
use serde::{Deserialize, Serialize};

use crate::types::PlaybackState;

/// Events emitted by the playback queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current item changed
    TrackChanged {
        /// Kind of the new (current) item
        kind: MediaKind,
        /// ID of the new (current) item
        item_id: MediaId,
        /// ID of the previous item (if any)
        previous_item_id: Option<MediaId>,
        /// Cursor after the transition
        cursor: usize,
        /// Generation assigned to this transition
        generation: u64,
    },

    /// Queue replaced by `play_media`
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Expanded-player flag flipped
    ExpandedChanged {
        /// New value
        expanded: bool,
    },

    /// The media handle could not load or start the current item
    PlaybackFailed {
        /// Generation the failure belongs to
        generation: u64,
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, PlaybackEvent::PlaybackFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_classification() {
        let failed = PlaybackEvent::PlaybackFailed {
            generation: 3,
            message: "decode error".to_string(),
        };
        assert!(failed.is_failure());
        assert!(!PlaybackEvent::ExpandedChanged { expanded: true }.is_failure());
    }

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["StateChanged"]["state"], "Playing");
    }
}
