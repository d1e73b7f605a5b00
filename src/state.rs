//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::IntroductionService;
use crate::infrastructure::cache::CacheStore;

#[derive(Clone)]
pub struct AppState {
    pub introduction_service: Arc<IntroductionService>,
    pub cache: Arc<dyn CacheStore>,
    /// Language used when a request does not name one.
    pub default_language: Arc<str>,
}

impl AppState {
    pub fn new(
        introduction_service: Arc<IntroductionService>,
        cache: Arc<dyn CacheStore>,
        default_language: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            introduction_service,
            cache,
            default_language: default_language.into(),
        }
    }
}
