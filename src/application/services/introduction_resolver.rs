//! Cache-or-fetch resolution of article introductions.

use std::sync::Arc;

use tracing::debug;

use crate::domain::cache_key::CacheKey;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::CacheEntry;
use crate::error::IntroductionError;
use crate::infrastructure::cache::{CacheError, CacheStore};
use crate::infrastructure::wikipedia::ArticleSource;

/// Resolves an introduction from the cache, falling back to the article source.
///
/// # Algorithm
///
/// 1. Derive the [`CacheKey`] for `(language, article_name)`
/// 2. On a cache hit, return the stored entry verbatim; its scrape date is
///    never refreshed
/// 3. On a miss, fetch from the source, stamp the text with the current time,
///    store it under the same key and return it
///
/// Failures of the cache store or the source are returned unchanged.
///
/// Concurrent misses for the same key are not deduplicated: each one fetches
/// and writes, and the last write wins.
pub struct IntroductionResolver {
    cache: Arc<dyn CacheStore>,
    source: Arc<dyn ArticleSource>,
    clock: Arc<dyn Clock>,
}

impl IntroductionResolver {
    /// Creates a resolver stamping fresh entries with the system clock.
    pub fn new(cache: Arc<dyn CacheStore>, source: Arc<dyn ArticleSource>) -> Self {
        Self {
            cache,
            source,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp freshly fetched entries.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the introduction of `article_name` in `language` and the time
    /// it was scraped.
    ///
    /// # Errors
    ///
    /// - [`IntroductionError::Cache`] if the store fails or holds a malformed entry
    /// - any error of [`ArticleSource::fetch_introduction`], unchanged
    pub async fn resolve(
        &self,
        article_name: &str,
        language: &str,
    ) -> Result<CacheEntry, IntroductionError> {
        let key = CacheKey::new(language, article_name);

        if let Some(raw) = self.cache.get(key.as_str()).await? {
            debug!("Cache HIT: {}", key);
            let entry = CacheEntry::from_json(&raw)
                .map_err(|e| CacheError::InvalidEntry(format!("{}: {}", key, e)))?;
            return Ok(entry);
        }

        debug!("Cache MISS: {}", key);

        let introduction = self
            .source
            .fetch_introduction(article_name, language)
            .await?;

        let entry = CacheEntry::new(introduction, self.clock.now_millis());
        let raw = entry
            .to_json()
            .map_err(|e| CacheError::InvalidEntry(format!("{}: {}", key, e)))?;

        self.cache.set(key.as_str(), &raw).await?;

        Ok(entry)
    }
}
