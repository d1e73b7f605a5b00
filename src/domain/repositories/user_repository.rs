//! Repository trait for user profiles.

use crate::domain::entities::UserProfile;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user profiles.
///
/// Credentials are never stored in clear text: every method taking a
/// `token_hash` expects the HMAC produced by
/// [`crate::application::services::user_service::hash_credential`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds the active (non-revoked) user owning a credential hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserProfile>, AppError>;

    /// Records that the user has just been seen.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch_last_seen(&self, user_id: i64) -> Result<(), AppError>;

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or credential is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_user(
        &self,
        name: &str,
        token_hash: &str,
        preferred_language: &str,
    ) -> Result<UserProfile, AppError>;

    /// Lists all users, newest first.
    async fn list_users(&self) -> Result<Vec<UserProfile>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserProfile>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UserProfile>, AppError>;

    /// Changes the preferred language of a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn update_preferred_language(&self, id: i64, language: &str) -> Result<(), AppError>;

    /// Revokes a user's credential, preventing further authentication.
    async fn revoke_user(&self, id: i64) -> Result<(), AppError>;

    /// Checks database connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}
