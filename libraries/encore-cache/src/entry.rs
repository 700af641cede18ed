use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A cached payload with its absolute expiry
///
/// Valid iff `now < expires_at_ms`. Expired entries are logically absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Cached value, opaque to the cache
    pub payload: Value,

    /// Absolute expiry (epoch milliseconds)
    pub expires_at_ms: i64,

    /// When the entry was written (epoch milliseconds), for diagnostics
    pub cached_at_ms: i64,
}

impl CacheEntry {
    /// Entry written at `now_ms` living for `ttl`
    pub fn new(payload: Value, now_ms: i64, ttl: Duration) -> Self {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            payload,
            expires_at_ms: now_ms.saturating_add(ttl_ms),
            cached_at_ms: now_ms,
        }
    }

    /// Whether the entry may still be served
    pub fn is_valid(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }
}
