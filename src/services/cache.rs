use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// In-process cache of resolved locations
///
/// Only successful lookups are stored, so a transient geocoder failure is retried
/// on the next request.
#[derive(Clone)]
pub struct LocationCache {
    entries: moka::future::Cache<String, Coordinates>,
}

impl LocationCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub async fn get(&self, location_text: &str) -> Option<Coordinates> {
        let key = CacheKey::location(location_text);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Location cache hit: {}", key);
        }
        hit
    }

    pub async fn insert(&self, location_text: &str, coordinates: Coordinates) {
        let key = CacheKey::location(location_text);
        self.entries.insert(key, coordinates).await;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Location texts differing only in case or surrounding whitespace share a key
    pub fn location(location_text: &str) -> String {
        format!("location:{}", location_text.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::location("Dwarka, Delhi"), "location:dwarka, delhi");
        assert_eq!(CacheKey::location("  SAKET "), "location:saket");
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = LocationCache::new(100, 60);
        let point = Coordinates::new(28.59, 77.04);

        assert!(cache.get("Dwarka").await.is_none());
        cache.insert("Dwarka", point).await;
        assert_eq!(cache.get("  dwarka ").await, Some(point));
        assert!(cache.get("Saket").await.is_none());
    }
}
