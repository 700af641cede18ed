//! Core types for playback management

use encore_core::MediaItem;
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded
    Idle,

    /// An item is loaded
    Playing,
}

/// Outcome of the most recent attempt to start the current item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackHealth {
    /// No handle attached, or the handle has not reported yet
    Unknown,

    /// The handle accepted the source and started playback
    Started,

    /// The handle failed to load or start the source
    Failed(String),
}

/// Configuration for the playback queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial value of the expanded-player UI flag (default: false)
    pub expanded: bool,

    /// Drive the attached handle on every transition (default: true)
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            expanded: false,
            autoplay: true,
        }
    }
}

/// Read-only view of the playback state for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub current: Option<MediaItem>,
    pub queue: Vec<MediaItem>,
    pub cursor: usize,
    pub expanded: bool,
    pub generation: u64,
    pub health: PlaybackHealth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert!(!config.expanded);
        assert!(config.autoplay);
    }
}
