//! Encore Cache - read-through response cache
//!
//! Reduces redundant network fetches while bounding staleness per data
//! category, and gives writers an explicit way to force freshness.
//!
//! # Features
//!
//! - Per-category time-to-live (`feed` expires quickly, `song` slowly)
//! - Fast in-memory tier (optionally LRU-bounded) backed by a persistent tier
//! - Promotion of persistent hits into memory
//! - Lazy expiry on access, no background sweeper
//! - Invalidation of one key, one category, or everything but a protected key
//!
//! The persistent tier is treated as unreliable: quota, availability and
//! serialization failures are logged and the cache carries on with memory only.
//!
//! # Example
//!
//! ```
//! use encore_cache::{CacheConfig, ReadThroughCache};
//! use serde_json::json;
//!
//! let cache = ReadThroughCache::memory_only(CacheConfig::default());
//!
//! assert!(cache.get("song", "abc", None).is_none());
//! cache.set("song", "abc", json!({ "title": "X" }), None);
//! assert_eq!(cache.get("song", "abc", None), Some(json!({ "title": "X" })));
//!
//! // A new post makes every cached feed page stale
//! cache.set("feed", "page-1", json!([1, 2, 3]), None);
//! cache.invalidate_type("feed");
//! assert!(cache.get("feed", "page-1", None).is_none());
//! ```

mod cache;
mod clock;
mod config;
mod entry;
mod error;
mod key;
pub mod store;

// Re-export public API
pub use cache::{CacheStats, ReadThroughCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use self::config::{CacheConfig, TtlPolicy};
pub use entry::CacheEntry;
pub use error::{CacheError, Result, StoreError};
pub use key::CacheKey;
pub use store::{MemoryStore, PersistentStore, RedbStore};
