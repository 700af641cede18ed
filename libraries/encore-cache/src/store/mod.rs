//! Persistent tier backends
//!
//! The cache talks to its slow tier only through [`PersistentStore`], so the
//! backing storage (in-process map, embedded database, browser storage bridge)
//! can be swapped without touching promotion or expiry logic.

mod memory;
mod redb;

pub use self::memory::MemoryStore;
pub use self::redb::RedbStore;

use crate::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// String key-value store that survives reloads
///
/// Every method may fail; callers treat failures as "tier unavailable".
pub trait PersistentStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// All keys currently stored (any order)
    fn keys(&self) -> StoreResult<Vec<String>>;
}
