//! Caching layer for market data to cut down on provider calls

use cached::{Cached, TimedCache};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for market data requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Ticker symbol
    pub symbol: String,
    /// Operation kind, e.g. "quote" or "history"
    pub endpoint: String,
    /// Extra parameters serialized to JSON
    pub params: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(
        symbol: impl Into<String>,
        endpoint: impl Into<String>,
        params: impl Serialize,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            endpoint: endpoint.into(),
            params: serde_json::to_string(&params).unwrap_or_default(),
        }
    }
}

/// Thread-safe TTL cache for market data
pub struct MarketCache {
    cache: Arc<RwLock<TimedCache<CacheKey, serde_json::Value>>>,
}

impl MarketCache {
    /// Create a new cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: CacheKey, value: serde_json::Value) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get a cached value, or fetch and cache it.
    ///
    /// A cached value is returned as-is; otherwise the fetcher runs and its
    /// result is stored before being returned. Fetch errors are not cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        fetcher: F,
    ) -> Result<serde_json::Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<serde_json::Value, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!("Cache hit for key: {:?}", key);
            return Ok(value);
        }

        tracing::debug!("Cache miss for key: {:?}", key);

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;

        Ok(value)
    }

    /// Invalidate a specific cache entry
    pub async fn invalidate(&self, key: &CacheKey) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(key);
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for MarketCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Cache tiers keyed by how quickly the underlying data goes stale
pub struct CacheTiers {
    /// Quotes and price history, short TTL
    pub realtime: MarketCache,
    /// Company fundamentals, long TTL
    pub fundamental: MarketCache,
}

impl CacheTiers {
    /// Create cache tiers with the given TTLs
    pub fn new(realtime_ttl: Duration, fundamental_ttl: Duration) -> Self {
        Self {
            realtime: MarketCache::new(realtime_ttl),
            fundamental: MarketCache::new(fundamental_ttl),
        }
    }

    /// Clear every tier
    pub async fn clear_all(&self) {
        self.realtime.clear().await;
        self.fundamental.clear().await;
    }
}

impl Clone for CacheTiers {
    fn clone(&self) -> Self {
        Self {
            realtime: self.realtime.clone(),
            fundamental: self.fundamental.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_key_creation() {
        let key = CacheKey::new("AAPL", "history", serde_json::json!({"period": "3mo"}));
        assert_eq!(key.symbol, "AAPL");
        assert_eq!(key.endpoint, "history");
        assert!(key.params.contains("3mo"));
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = MarketCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", "quote", serde_json::json!({}));
        let value = serde_json::json!({"price": 150.0});

        cache.insert(key.clone(), value.clone()).await;

        let retrieved = cache.get(&key).await;
        assert_eq!(retrieved, Some(value));
    }

    #[tokio::test]
    async fn test_get_or_fetch_only_fetches_once() {
        let cache = MarketCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", "quote", serde_json::json!({}));
        let value = serde_json::json!({"price": 150.0});

        let mut call_count = 0;
        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, String>(value.clone()) }
            })
            .await
            .unwrap();
        assert_eq!(result, value);
        assert_eq!(call_count, 1);

        let result = cache
            .get_or_fetch(key.clone(), || async {
                call_count += 1;
                Ok::<_, String>(value.clone())
            })
            .await
            .unwrap();
        assert_eq!(result, value);
        assert_eq!(call_count, 1);
    }

    #[tokio::test]
    async fn test_fetch_error_is_not_cached() {
        let cache = MarketCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", "quote", serde_json::json!({}));

        let result = cache
            .get_or_fetch(key.clone(), || async {
                Err::<serde_json::Value, _>("upstream down".to_string())
            })
            .await;
        assert!(result.is_err());
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_invalidation() {
        let cache = MarketCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", "quote", serde_json::json!({}));

        cache.insert(key.clone(), serde_json::json!({"price": 150.0})).await;
        assert!(cache.get(&key).await.is_some());

        cache.invalidate(&key).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = MarketCache::new(Duration::from_secs(60));

        for i in 0..5 {
            let key = CacheKey::new(format!("SYM{i}"), "quote", serde_json::json!({}));
            cache.insert(key, serde_json::json!({"price": i})).await;
        }

        assert_eq!(cache.len().await, 5);

        cache.clear().await;
        assert_eq!(cache.len().await, 0);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_tiers() {
        let tiers = CacheTiers::new(Duration::from_secs(60), Duration::from_secs(3600));

        let key = CacheKey::new("AAPL", "quote", serde_json::json!({}));
        let value = serde_json::json!({"price": 150.0});

        tiers.realtime.insert(key.clone(), value.clone()).await;
        tiers.fundamental.insert(key.clone(), value).await;

        assert_eq!(tiers.realtime.len().await, 1);
        assert_eq!(tiers.fundamental.len().await, 1);

        tiers.clear_all().await;

        assert!(tiers.realtime.is_empty().await);
        assert!(tiers.fundamental.is_empty().await);
    }
}
