//! Encore Core
//!
//! Platform-agnostic media types and error handling shared by the Encore
//! client libraries.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaItem`, `MediaKind`, `MediaId`
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! Relative-path resolution happens in the calling application. By the time a
//! `MediaItem` exists its source location is an absolute URL.
//!
//! # Example
//!
//! ```rust
//! use encore_core::{MediaItem, MediaKind};
//!
//! let item = MediaItem::new(
//!     MediaKind::Song,
//!     "abc",
//!     "https://cdn.example.com/songs/abc.mp3",
//!     "Night Drive",
//!     "The Wanderers",
//! )
//! .unwrap();
//!
//! assert_eq!(item.id.as_str(), "abc");
//! assert!(item.artwork_url.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{EncoreError, Result};
pub use types::{MediaId, MediaItem, MediaKind};
