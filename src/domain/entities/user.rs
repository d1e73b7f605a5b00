//! User profile entity.

use chrono::{DateTime, Utc};

/// A registered API user.
///
/// Users authenticate with a Bearer token whose HMAC is stored as
/// `token_hash`. The lookup pipeline only reads `preferred_language`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}
