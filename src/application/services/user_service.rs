//! User identity service resolving credentials to user profiles.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::UserProfile;
use crate::domain::repositories::UserRepository;
use crate::error::IntroductionError;

type HmacSha256 = Hmac<Sha256>;

/// Resolves an optional caller credential to an optional user profile.
#[async_trait]
pub trait UserResolver: Send + Sync {
    /// Validates `credential` and returns the matching user.
    ///
    /// - `None` credential: `Ok(None)`, the caller is anonymous
    /// - valid credential: `Ok(Some(profile))`
    ///
    /// # Errors
    ///
    /// Returns [`IntroductionError::Auth`] if the credential is unknown or
    /// revoked, or if the user store cannot be queried.
    async fn validate_and_get_user(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<UserProfile>, IntroductionError>;

    /// Checks that the user store is reachable.
    async fn health_check(&self) -> bool;
}

/// Hashes a raw credential with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. The admin CLI uses the
/// same function when issuing credentials.
pub fn hash_credential(signing_secret: &str, credential: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(credential.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// [`UserResolver`] backed by a [`UserRepository`].
///
/// Credentials are Bearer tokens hashed with HMAC-SHA256 (keyed by
/// `signing_secret`) before lookup, so the database alone cannot be used to
/// forge or verify tokens.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when credentials were issued
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }
}

#[async_trait]
impl<R: UserRepository> UserResolver for UserService<R> {
    async fn validate_and_get_user(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<UserProfile>, IntroductionError> {
        let Some(credential) = credential else {
            return Ok(None);
        };

        let token_hash = hash_credential(&self.signing_secret, credential);

        let user = self
            .repository
            .find_active_by_token_hash(&token_hash)
            .await
            .map_err(|e| IntroductionError::Auth(format!("User lookup failed: {}", e)))?
            .ok_or_else(|| IntroductionError::Auth("Invalid or revoked credential".to_string()))?;

        debug!(user_id = user.id, "Resolved credential to user");

        let _ = self.repository.touch_last_seen(user.id).await;

        Ok(Some(user))
    }

    async fn health_check(&self) -> bool {
        self.repository.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::error::AppError;
    use chrono::Utc;
    use serde_json::json;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn test_user(id: i64, language: &str) -> UserProfile {
        UserProfile {
            id,
            name: "alice".to_string(),
            preferred_language: language.to_string(),
            created_at: Utc::now(),
            last_seen_at: None,
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn test_absent_credential_is_anonymous() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_active_by_token_hash().times(0);

        let service = UserService::new(Arc::new(mock_repo), test_secret());

        let result = service.validate_and_get_user(None).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_valid_credential_returns_profile() {
        let mut mock_repo = MockUserRepository::new();
        let expected_hash = hash_credential(&test_secret(), "valid-token");

        mock_repo
            .expect_find_active_by_token_hash()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(test_user(7, "fr"))));

        mock_repo
            .expect_touch_last_seen()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(mock_repo), test_secret());

        let user = service
            .validate_and_get_user(Some("valid-token"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.preferred_language, "fr");
    }

    #[tokio::test]
    async fn test_unknown_credential_is_auth_error() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_active_by_token_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo), test_secret());

        let result = service.validate_and_get_user(Some("bogus")).await;

        assert!(matches!(result, Err(IntroductionError::Auth(_))));
    }

    #[tokio::test]
    async fn test_repository_failure_is_auth_error() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_active_by_token_hash()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = UserService::new(Arc::new(mock_repo), test_secret());

        let result = service.validate_and_get_user(Some("token")).await;

        assert!(matches!(result, Err(IntroductionError::Auth(_))));
    }

    #[tokio::test]
    async fn test_touch_failure_is_ignored() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_active_by_token_hash()
            .returning(|_| Ok(Some(test_user(1, "de"))));
        mock_repo
            .expect_touch_last_seen()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = UserService::new(Arc::new(mock_repo), test_secret());

        let result = service.validate_and_get_user(Some("token")).await;

        assert!(result.unwrap().is_some());
    }

    #[test]
    fn test_hash_credential_consistency() {
        let hash1 = hash_credential(&test_secret(), "test-token");
        let hash2 = hash_credential(&test_secret(), "test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_credential(&test_secret(), "other-token"));
    }

    #[test]
    fn test_hash_credential_secret_matters() {
        assert_ne!(
            hash_credential("secret-a", "token"),
            hash_credential("secret-b", "token")
        );
    }
}
