//! Geocode result cache.
//!
//! Location text is resolved once per generation run: the start, end and
//! every constraint region may repeat the same text, and each lookup is a
//! billed API call. Keys are normalized (trimmed, lowercased) so "Paris"
//! and " paris" share an entry. Negative results are cached too, so a text
//! that resolves to nothing is not looked up twice.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::GeoPoint;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 256,
        }
    }
}

/// Cache of geocode lookups keyed by normalized query text.
#[derive(Clone)]
pub struct GeocodeCache {
    entries: MokaCache<String, Option<GeoPoint>>,
}

impl GeocodeCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Normalize query text into a cache key.
    pub fn key(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Look up a previous result.
    ///
    /// The outer `Option` is a cache miss; the inner one is a cached
    /// "no such place".
    pub async fn get(&self, text: &str) -> Option<Option<GeoPoint>> {
        self.entries.get(&Self::key(text)).await
    }

    /// Record the outcome of a lookup.
    pub async fn insert(&self, text: &str, point: Option<GeoPoint>) {
        self.entries.insert(Self::key(text), point).await;
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
