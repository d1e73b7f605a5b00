#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiki_intro::application::services::{IntroductionResolver, IntroductionService, UserResolver};
use wiki_intro::domain::clock::Clock;
use wiki_intro::domain::entities::UserProfile;
use wiki_intro::error::IntroductionError;
use wiki_intro::infrastructure::cache::{CacheError, CacheResult, CacheStore};
use wiki_intro::infrastructure::wikipedia::ArticleSource;
use wiki_intro::state::AppState;

pub const SCRAPE_TIME: i64 = 1_717_171_717_171;

/// In-memory cache store.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    pub fail: bool,
}

impl MemoryCache {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        if self.fail {
            return Err(CacheError::ConnectionError("connection refused".into()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        if self.fail {
            return Err(CacheError::ConnectionError("connection refused".into()));
        }
        self.insert(key, value);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Article source serving fixed texts keyed by `(language, article)`.
#[derive(Default)]
pub struct StubSource {
    articles: HashMap<(String, String), String>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn with_article(mut self, language: &str, article: &str, text: &str) -> Self {
        self.articles
            .insert((language.to_string(), article.to_string()), text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleSource for StubSource {
    async fn fetch_introduction(
        &self,
        article_name: &str,
        language: &str,
    ) -> Result<String, IntroductionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.articles
            .get(&(language.to_string(), article_name.to_string()))
            .cloned()
            .ok_or_else(|| IntroductionError::Upstream("404 from upstream".into()))
    }
}

/// Accepts credentials registered with [`StaticUsers::with_user`].
#[derive(Default)]
pub struct StaticUsers {
    users: HashMap<String, String>,
    pub healthy: bool,
}

impl StaticUsers {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            healthy: true,
        }
    }

    pub fn with_user(mut self, credential: &str, preferred_language: &str) -> Self {
        self.users
            .insert(credential.to_string(), preferred_language.to_string());
        self
    }
}

#[async_trait]
impl UserResolver for StaticUsers {
    async fn validate_and_get_user(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<UserProfile>, IntroductionError> {
        let Some(credential) = credential else {
            return Ok(None);
        };

        let language = self
            .users
            .get(credential)
            .ok_or_else(|| IntroductionError::Auth("unknown credential".into()))?;

        Ok(Some(UserProfile {
            id: 1,
            name: "tester".to_string(),
            preferred_language: language.clone(),
            created_at: Utc::now(),
            last_seen_at: None,
            revoked_at: None,
        }))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub fn create_test_state(
    users: StaticUsers,
    cache: Arc<MemoryCache>,
    source: Arc<StubSource>,
) -> AppState {
    let resolver = IntroductionResolver::new(cache.clone(), source)
        .with_clock(Arc::new(FixedClock(SCRAPE_TIME)));
    let service = IntroductionService::new(Arc::new(users), resolver);

    AppState::new(Arc::new(service), cache, "en")
}
