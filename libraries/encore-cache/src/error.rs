use thiserror::Error;

/// Errors raised by a persistent store
///
/// The cache never propagates these from its core operations; they are
/// logged at the tier boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage disabled or unreachable
    #[error("Persistent store unavailable")]
    Unavailable,

    /// Write would exceed the store's quota
    #[error("Quota exceeded: need {needed} bytes, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// Backend-specific failure
    #[error("Store backend error: {0}")]
    Backend(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Wrap any backend error
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Errors from the fallible cache helpers (configuration, typed payloads)
#[derive(Debug, Error)]
pub enum CacheError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
