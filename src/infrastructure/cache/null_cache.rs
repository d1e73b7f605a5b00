//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheStore};
use async_trait::async_trait;
use tracing::debug;

/// A cache store that never holds anything.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup
/// misses, so every request goes to Wikipedia.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        cache.set("wikipedia:en:Cat", "{}").await.unwrap();

        assert!(cache.get("wikipedia:en:Cat").await.unwrap().is_none());
        assert!(cache.health_check().await);
    }
}
