//! Time-bounded cache of price quotes

use cached::{Cached, TimedCache};
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe TTL cache shared between clones
pub struct TtlCache<K, V> {
    cache: Arc<RwLock<TimedCache<K, V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        // TimedCache evicts on read, so lookups take the write lock
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut cache = self.cache.write().await;
        cache.cache_set(key, value);
    }

    /// Return the cached value or fetch and cache it
    ///
    /// Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(?key, "Cache hit");
            return Ok(value);
        }
        tracing::debug!(?key, "Cache miss");

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    pub async fn invalidate(&self, key: &K) {
        let mut cache = self.cache.write().await;
        cache.cache_remove(key);
    }

    pub async fn clear(&self) {
        self.cache.write().await.cache_clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("FPT".to_string(), 96_000.0).await;

        assert_eq!(cache.get(&"FPT".to_string()).await, Some(96_000.0));
        assert_eq!(cache.get(&"VNM".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_success_only() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let mut calls = 0;

        let failed: Result<f64, String> = cache
            .get_or_fetch("HPG".to_string(), || {
                calls += 1;
                async { Err("source down".to_string()) }
            })
            .await;
        assert!(failed.is_err());
        assert!(cache.is_empty().await);

        let price = cache
            .get_or_fetch("HPG".to_string(), || {
                calls += 1;
                async { Ok::<_, String>(27_350.0) }
            })
            .await
            .unwrap();
        assert_eq!(price, 27_350.0);

        let price = cache
            .get_or_fetch("HPG".to_string(), || {
                calls += 1;
                async { Ok::<_, String>(0.0) }
            })
            .await
            .unwrap();
        assert_eq!(price, 27_350.0);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.insert("MWG", 61_200.0).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get(&"MWG").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = TtlCache::new(Duration::from_secs(60));
        for symbol in ["ACB", "BID", "CTG"] {
            cache.insert(symbol, 1.0).await;
        }
        assert_eq!(cache.len().await, 3);

        cache.invalidate(&"ACB").await;
        assert_eq!(cache.get(&"ACB").await, None);

        let shared = cache.clone();
        shared.clear().await;
        assert!(cache.is_empty().await);
    }
}
