//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Media handle could not load or start the source
    #[error("Media handle error: {0}")]
    MediaHandle(String),
}

impl PlaybackError {
    /// Create a media handle error
    pub fn media_handle(msg: impl Into<String>) -> Self {
        Self::MediaHandle(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
