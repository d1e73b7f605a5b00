//! Introduction lookup orchestration.

use std::sync::Arc;

use tracing::warn;

use super::introduction_resolver::IntroductionResolver;
use super::user_service::UserResolver;
use crate::domain::entities::Introduction;
use crate::error::IntroductionError;

/// Entry point for introduction lookups.
///
/// Resolves the caller's effective language, delegates to the
/// [`IntroductionResolver`] and assembles the [`Introduction`].
///
/// # Language Resolution
///
/// If the credential resolves to a user, the user's preferred language is
/// used for the lookup. The returned `language` is always the one the caller
/// asked for, even when the text was fetched in the preferred language.
///
/// # Error Normalization
///
/// A [`IntroductionError::NotFound`] raised along the way is returned as is.
/// Every other failure (authentication, cache store, upstream) is logged and
/// replaced by `NotFound` for the requested article and language.
pub struct IntroductionService {
    users: Arc<dyn UserResolver>,
    resolver: IntroductionResolver,
}

impl IntroductionService {
    pub fn new(users: Arc<dyn UserResolver>, resolver: IntroductionResolver) -> Self {
        Self { users, resolver }
    }

    /// Returns the introduction of `article_name`.
    ///
    /// # Errors
    ///
    /// Only ever returns [`IntroductionError::NotFound`].
    pub async fn get_introduction(
        &self,
        article_name: &str,
        language: &str,
        credential: Option<&str>,
    ) -> Result<Introduction, IntroductionError> {
        self.lookup(article_name, language, credential)
            .await
            .map_err(|error| match error {
                not_found @ IntroductionError::NotFound { .. } => not_found,
                other => {
                    warn!(
                        article = article_name,
                        language, "Introduction lookup failed: {}", other
                    );
                    IntroductionError::not_found(article_name, language)
                }
            })
    }

    async fn lookup(
        &self,
        article_name: &str,
        language: &str,
        credential: Option<&str>,
    ) -> Result<Introduction, IntroductionError> {
        let user = self.users.validate_and_get_user(credential).await?;

        let effective_language = user
            .as_ref()
            .map_or(language, |user| user.preferred_language.as_str());

        let entry = self
            .resolver
            .resolve(article_name, effective_language)
            .await?;

        Ok(Introduction {
            scrape_date: entry.scrape_date,
            article_name: article_name.to_string(),
            introduction: entry.introduction,
            language: language.to_string(),
        })
    }

    /// Checks that the user store is reachable.
    pub async fn users_healthy(&self) -> bool {
        self.users.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::MockClock;
    use crate::domain::entities::UserProfile;
    use crate::infrastructure::cache::{CacheError, MockCacheStore};
    use crate::infrastructure::wikipedia::MockArticleSource;
    use async_trait::async_trait;
    use chrono::Utc;

    /// Resolves every credential to the same outcome.
    enum StaticUsers {
        Anonymous,
        Preferring(&'static str),
        Rejecting,
    }

    #[async_trait]
    impl UserResolver for StaticUsers {
        async fn validate_and_get_user(
            &self,
            credential: Option<&str>,
        ) -> Result<Option<UserProfile>, IntroductionError> {
            match (self, credential) {
                (_, None) | (StaticUsers::Anonymous, _) => Ok(None),
                (StaticUsers::Preferring(language), Some(_)) => Ok(Some(UserProfile {
                    id: 1,
                    name: "alice".to_string(),
                    preferred_language: language.to_string(),
                    created_at: Utc::now(),
                    last_seen_at: None,
                    revoked_at: None,
                })),
                (StaticUsers::Rejecting, Some(_)) => {
                    Err(IntroductionError::Auth("expired".to_string()))
                }
            }
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn service(
        users: StaticUsers,
        cache: MockCacheStore,
        source: MockArticleSource,
    ) -> IntroductionService {
        let mut clock = MockClock::new();
        clock.expect_now_millis().return_const(1_700_000_000_000_i64);

        let resolver = IntroductionResolver::new(Arc::new(cache), Arc::new(source))
            .with_clock(Arc::new(clock));
        IntroductionService::new(Arc::new(users), resolver)
    }

    fn empty_cache() -> MockCacheStore {
        let mut cache = MockCacheStore::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().returning(|_, _| Ok(()));
        cache
    }

    #[tokio::test]
    async fn test_miss_end_to_end() {
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .withf(|key| key == "wikipedia:en:Cat")
            .times(1)
            .returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, _| key == "wikipedia:en:Cat")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut source = MockArticleSource::new();
        source
            .expect_fetch_introduction()
            .times(1)
            .returning(|_, _| Ok("Cats are...".to_string()));

        let intro = service(StaticUsers::Anonymous, cache, source)
            .get_introduction("Cat", "en", None)
            .await
            .unwrap();

        assert_eq!(
            intro,
            Introduction {
                scrape_date: 1_700_000_000_000,
                article_name: "Cat".to_string(),
                introduction: "Cats are...".to_string(),
                language: "en".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_hit_end_to_end_keeps_scrape_date() {
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .withf(|key| key == "wikipedia:en:Cat")
            .returning(|_| Ok(Some(r#"{"introduction":"Cats are...","scrapeDate":1000}"#.into())));
        cache.expect_set().times(0);

        let mut source = MockArticleSource::new();
        source.expect_fetch_introduction().times(0);

        let intro = service(StaticUsers::Anonymous, cache, source)
            .get_introduction("Cat", "en", None)
            .await
            .unwrap();

        assert_eq!(intro.scrape_date, 1000);
        assert_eq!(intro.introduction, "Cats are...");
    }

    #[tokio::test]
    async fn test_preferred_language_overrides_but_request_is_echoed() {
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .withf(|key| key == "wikipedia:fr:Cat")
            .returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, _| key == "wikipedia:fr:Cat")
            .returning(|_, _| Ok(()));

        let mut source = MockArticleSource::new();
        source
            .expect_fetch_introduction()
            .withf(|article, language| article == "Cat" && language == "fr")
            .times(1)
            .returning(|_, _| Ok("Le chat...".to_string()));

        let intro = service(StaticUsers::Preferring("fr"), cache, source)
            .get_introduction("Cat", "en", Some("token"))
            .await
            .unwrap();

        assert_eq!(intro.language, "en");
        assert_eq!(intro.introduction, "Le chat...");
    }

    #[tokio::test]
    async fn test_article_name_is_echoed_verbatim() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_introduction()
            .returning(|_, _| Ok("Text".to_string()));

        let intro = service(StaticUsers::Anonymous, empty_cache(), source)
            .get_introduction("  cat_(animal) ", "en", None)
            .await
            .unwrap();

        assert_eq!(intro.article_name, "  cat_(animal) ");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_normalized() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_introduction()
            .returning(|_, _| Err(IntroductionError::Upstream("dns error".into())));

        let err = service(StaticUsers::Anonymous, empty_cache(), source)
            .get_introduction("Ghost", "xx", None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        let message = err.to_string();
        assert!(message.contains("Ghost"));
        assert!(message.contains("xx"));
    }

    #[tokio::test]
    async fn test_auth_failure_is_normalized() {
        let mut source = MockArticleSource::new();
        source.expect_fetch_introduction().times(0);

        let err = service(StaticUsers::Rejecting, MockCacheStore::new(), source)
            .get_introduction("Cat", "en", Some("expired-token"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IntroductionError::NotFound { ref article, ref language }
                if article == "Cat" && language == "en"
        ));
    }

    #[tokio::test]
    async fn test_cache_failure_is_normalized() {
        let mut cache = MockCacheStore::new();
        cache
            .expect_get()
            .returning(|_| Err(CacheError::ConnectionError("refused".into())));

        let err = service(StaticUsers::Anonymous, cache, MockArticleSource::new())
            .get_introduction("Cat", "en", None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Article 'Cat' not found in en Wikipedia");
    }

    #[tokio::test]
    async fn test_not_found_passes_through_unchanged() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_introduction()
            .returning(|article, language| Err(IntroductionError::not_found(article, language)));

        let err = service(StaticUsers::Preferring("de"), empty_cache(), source)
            .get_introduction("Ghost", "en", Some("token"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Article 'Ghost' not found in de Wikipedia");
    }
}
