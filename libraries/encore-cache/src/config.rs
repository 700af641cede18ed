/// Cache configuration
use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// TTL for categories without an entry in `ttl_secs`
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    /// Per-category TTLs, layered over the built-in table
    #[serde(default = "default_category_ttls")]
    pub ttl_secs: BTreeMap<String, u64>,

    /// Serialized entries at or above this size stay in memory only
    #[serde(default = "default_max_persisted_bytes")]
    pub max_persisted_bytes: usize,

    /// Bound on in-memory entries (least recently used evicted first)
    #[serde(default)]
    pub fast_tier_capacity: Option<usize>,

    /// Prefix of cache keys inside the shared persistent keyspace
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_ttl_secs() -> u64 {
    60
}

fn default_category_ttls() -> BTreeMap<String, u64> {
    [
        ("user", 5 * 60),
        ("playlists", 2 * 60),
        ("feed", 60),
        ("trending", 3 * 60),
        ("artist", 10 * 60),
        ("song", 30 * 60),
    ]
    .into_iter()
    .map(|(category, secs)| (category.to_string(), secs))
    .collect()
}

fn default_max_persisted_bytes() -> usize {
    100 * 1024
}

fn default_namespace() -> String {
    "encore.cache.".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl_secs(),
            ttl_secs: default_category_ttls(),
            max_persisted_bytes: default_max_persisted_bytes(),
            fast_tier_capacity: None,
            namespace: default_namespace(),
        }
    }
}

impl CacheConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables are prefixed with `ENCORE_CACHE_`; nested keys use
    /// `__`, e.g. `ENCORE_CACHE_TTL_SECS__FEED=30`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(::config::File::from(path));
            }
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix("ENCORE_CACHE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CacheError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CacheError::Config(e.to_string()))
    }

    /// Build the TTL policy, configured categories overriding the built-in table
    pub fn ttl_policy(&self) -> TtlPolicy {
        let mut policy = TtlPolicy::new(Duration::from_secs(self.default_ttl_secs));
        for (category, secs) in default_category_ttls().iter().chain(&self.ttl_secs) {
            policy.set(category, Duration::from_secs(*secs));
        }
        policy
    }
}

/// Mapping from category to time-to-live
#[derive(Debug, Clone)]
pub struct TtlPolicy {
    default_ttl: Duration,
    categories: HashMap<String, Duration>,
}

impl TtlPolicy {
    /// Policy where every category uses `default_ttl`
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            categories: HashMap::new(),
        }
    }

    /// Builder-style variant of [`set`](Self::set)
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>, ttl: Duration) -> Self {
        self.categories.insert(category.into(), ttl);
        self
    }

    /// Set the TTL of one category
    pub fn set(&mut self, category: impl Into<String>, ttl: Duration) {
        self.categories.insert(category.into(), ttl);
    }

    /// TTL for a category, falling back to the default
    pub fn ttl_for(&self, category: &str) -> Duration {
        self.categories
            .get(category)
            .copied()
            .unwrap_or(self.default_ttl)
    }

    /// TTL used for unlisted categories
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        CacheConfig::default().ttl_policy()
    }
}
