//! Two-tier read-through cache
//!
//! The fast tier is an in-process LRU map (unbounded unless configured). The
//! slow tier is any [`PersistentStore`]; its entries are stored as serialized
//! [`CacheEntry`] JSON under `namespace + key`.
//!
//! Core operations never fail. Slow-tier errors are logged and the cache keeps
//! serving from memory.

use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, TtlPolicy};
use crate::entry::CacheEntry;
use crate::error::Result;
use crate::key::CacheKey;
use crate::store::{PersistentStore, StoreResult};
use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Live entry counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub fast_tier_count: usize,
    pub slow_tier_count: usize,
}

/// Read-through cache keyed by `{category, id, params}`
///
/// Every operation holds the fast-tier lock for its whole duration, slow-tier
/// I/O included. A promotion in `get` therefore never lands after a concurrent
/// invalidation, and the two writes of `set` are never interleaved with another
/// writer's.
pub struct ReadThroughCache {
    fast: Mutex<LruCache<String, CacheEntry>>,
    slow: Option<Arc<dyn PersistentStore>>,
    clock: Arc<dyn Clock>,
    policy: TtlPolicy,
    namespace: String,
    max_persisted_bytes: usize,
}

impl ReadThroughCache {
    /// Cache over `store` using the wall clock
    pub fn new(config: CacheConfig, store: Arc<dyn PersistentStore>) -> Self {
        Self::with_clock(config, Some(store), Arc::new(SystemClock))
    }

    /// Cache without a persistent tier
    pub fn memory_only(config: CacheConfig) -> Self {
        Self::with_clock(config, None, Arc::new(SystemClock))
    }

    /// Fully injected constructor
    pub fn with_clock(
        config: CacheConfig,
        store: Option<Arc<dyn PersistentStore>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fast = config
            .fast_tier_capacity
            .and_then(NonZeroUsize::new)
            .map_or_else(LruCache::unbounded, LruCache::new);

        Self {
            fast: Mutex::new(fast),
            slow: store,
            clock,
            policy: config.ttl_policy(),
            namespace: config.namespace,
            max_persisted_bytes: config.max_persisted_bytes,
        }
    }

    /// Active TTL policy
    pub fn policy(&self) -> &TtlPolicy {
        &self.policy
    }

    /// Look up a payload
    ///
    /// `None` means absent or expired; a cached `null` comes back as
    /// `Some(Value::Null)`.
    pub fn get(&self, category: &str, id: &str, params: Option<&Value>) -> Option<Value> {
        let key = CacheKey::new(category, id, params).to_string();
        let now = self.clock.now_ms();

        let mut fast = self.fast();
        match fast.get(&key).map(|entry| entry.is_valid(now)) {
            Some(true) => return fast.get(&key).map(|entry| entry.payload.clone()),
            Some(false) => {
                fast.pop(&key);
                debug!(key = %key, "Purged expired entry from memory");
            }
            None => {}
        }

        let entry = self.read_slow(&key, now)?;
        let payload = entry.payload.clone();
        fast.put(key.clone(), entry);
        debug!(key = %key, "Promoted persistent entry to memory");
        Some(payload)
    }

    /// Store a payload under the category's TTL
    pub fn set(&self, category: &str, id: &str, payload: Value, params: Option<&Value>) {
        let key = CacheKey::new(category, id, params).to_string();
        let ttl = self.policy.ttl_for(category);
        let entry = CacheEntry::new(payload, self.clock.now_ms(), ttl);

        let serialized = match serde_json::to_string(&entry) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize cache entry");
                None
            }
        };

        let mut fast = self.fast();
        fast.put(key.clone(), entry);

        let (Some(store), Some(serialized)) = (&self.slow, serialized) else {
            return;
        };
        let slow_key = self.slow_key(&key);

        if serialized.len() >= self.max_persisted_bytes {
            debug!(
                key = %key,
                bytes = serialized.len(),
                ceiling = self.max_persisted_bytes,
                "Entry too large for persistent tier, keeping in memory only"
            );
            // An older, smaller copy would otherwise outlive this write
            if let Err(e) = store.remove(&slow_key) {
                warn!(key = %key, error = %e, "Failed to drop stale persistent entry");
            }
            return;
        }

        if let Err(e) = store.set(&slow_key, &serialized) {
            warn!(key = %key, error = %e, "Persistent cache write failed");
        }
    }

    /// Remove one entry from both tiers
    pub fn invalidate(&self, category: &str, id: &str, params: Option<&Value>) {
        let key = CacheKey::new(category, id, params).to_string();
        let mut fast = self.fast();
        fast.pop(&key);

        if let Some(store) = &self.slow {
            if let Err(e) = store.remove(&self.slow_key(&key)) {
                warn!(key = %key, error = %e, "Persistent cache invalidate failed");
            }
        }
    }

    /// Remove every entry of `category` from both tiers
    pub fn invalidate_type(&self, category: &str) {
        let prefix = CacheKey::category_prefix(category);

        let mut fast = self.fast();
        let doomed: Vec<String> = fast
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            fast.pop(key);
        }
        debug!(category, removed = doomed.len(), "Invalidated category in memory");

        let Some(store) = &self.slow else {
            return;
        };
        let slow_prefix = self.slow_key(&prefix);
        match store.keys() {
            Ok(keys) => {
                for key in keys.iter().filter(|key| key.starts_with(&slow_prefix)) {
                    if let Err(e) = store.remove(key) {
                        warn!(key = %key, error = %e, "Persistent cache invalidate failed");
                    }
                }
            }
            Err(e) => warn!(category, error = %e, "Persistent cache unavailable for invalidation"),
        }
    }

    /// Wipe both tiers except `preserve`
    ///
    /// In the persistent keyspace `preserve` is matched both as a raw store key
    /// (e.g. an auth token written by another component) and as a cache key.
    pub fn clear_all(&self, preserve: Option<&str>) {
        let mut fast = self.fast();
        let kept = preserve.and_then(|key| fast.pop_entry(key));
        fast.clear();
        if let Some((key, entry)) = kept {
            fast.put(key, entry);
        }

        let Some(store) = &self.slow else {
            return;
        };
        let preserved_slow = preserve.map(|key| self.slow_key(key));
        let keys = match store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Persistent cache unavailable, cleared memory only");
                return;
            }
        };

        for key in keys {
            if preserve == Some(key.as_str()) || preserved_slow.as_deref() == Some(key.as_str()) {
                continue;
            }
            if let Err(e) = store.remove(&key) {
                warn!(key = %key, error = %e, "Failed to clear persistent entry");
            }
        }
    }

    /// Count unexpired entries in each tier
    pub fn get_stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let fast_tier_count = self
            .fast()
            .iter()
            .filter(|(_, entry)| entry.is_valid(now))
            .count();

        let slow_tier_count = self.slow.as_ref().map_or(0, |store| {
            match self.slow_entries(store.as_ref()) {
                Ok(entries) => entries
                    .iter()
                    .filter(|(_, entry)| entry.as_ref().is_some_and(|e| e.is_valid(now)))
                    .count(),
                Err(e) => {
                    warn!(error = %e, "Persistent cache unavailable for stats");
                    0
                }
            }
        });

        CacheStats {
            fast_tier_count,
            slow_tier_count,
        }
    }

    /// Remove every expired (or unreadable) entry from both tiers
    ///
    /// Never called implicitly; expiry is otherwise lazy.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();

        let mut fast = self.fast();
        let expired: Vec<String> = fast
            .iter()
            .filter(|(_, entry)| !entry.is_valid(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            fast.pop(key);
        }
        let mut removed = expired.len();

        if let Some(store) = &self.slow {
            match self.slow_entries(store.as_ref()) {
                Ok(entries) => {
                    for (key, entry) in entries {
                        if entry.is_some_and(|e| e.is_valid(now)) {
                            continue;
                        }
                        match store.remove(&key) {
                            Ok(()) => removed += 1,
                            Err(e) => warn!(key = %key, error = %e, "Failed to purge persistent entry"),
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Persistent cache unavailable for purge"),
            }
        }

        debug!(removed, "Purged expired cache entries");
        removed
    }

    /// [`get`](Self::get) deserialized into `T`
    pub fn get_as<T: DeserializeOwned>(
        &self,
        category: &str,
        id: &str,
        params: Option<&Value>,
    ) -> Result<Option<T>> {
        self.get(category, id, params)
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }

    /// [`set`](Self::set) from any serializable value
    pub fn set_as<T: Serialize>(
        &self,
        category: &str,
        id: &str,
        payload: &T,
        params: Option<&Value>,
    ) -> Result<()> {
        let value = serde_json::to_value(payload)?;
        self.set(category, id, value, params);
        Ok(())
    }

    fn fast(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.fast.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slow_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    /// Valid slow-tier entry for `key`; expired or corrupt entries are removed
    fn read_slow(&self, key: &str, now: i64) -> Option<CacheEntry> {
        let store = self.slow.as_ref()?;
        let slow_key = self.slow_key(key);

        let raw = match store.get(&slow_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %key, error = %e, "Persistent cache read failed");
                return None;
            }
        };

        let entry = match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable persistent entry");
                if let Err(e) = store.remove(&slow_key) {
                    warn!(key = %key, error = %e, "Failed to drop unreadable persistent entry");
                }
                return None;
            }
        };

        if entry.is_valid(now) {
            return Some(entry);
        }

        debug!(key = %key, "Purged expired entry from persistent tier");
        if let Err(e) = store.remove(&slow_key) {
            warn!(key = %key, error = %e, "Failed to purge persistent entry");
        }
        None
    }

    /// Every namespaced slow-tier key with its parsed entry (`None` if unreadable)
    fn slow_entries(
        &self,
        store: &dyn PersistentStore,
    ) -> StoreResult<Vec<(String, Option<CacheEntry>)>> {
        let mut entries = Vec::new();
        for key in store.keys()? {
            if !key.starts_with(&self.namespace) {
                continue;
            }
            let entry = store
                .get(&key)?
                .and_then(|raw| serde_json::from_str::<CacheEntry>(&raw).ok());
            entries.push((key, entry));
        }
        Ok(entries)
    }
}

impl std::fmt::Debug for ReadThroughCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("fast_len", &self.fast().len())
            .field("has_slow_tier", &self.slow.is_some())
            .field("namespace", &self.namespace)
            .field("max_persisted_bytes", &self.max_persisted_bytes)
            .finish_non_exhaustive()
    }
}
