//! Article source trait.

use async_trait::async_trait;

use crate::error::IntroductionError;

/// Fetches the introduction text of an article from an encyclopedia edition.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns the plain-text introduction of `article_name` in `language`.
    ///
    /// # Errors
    ///
    /// - [`IntroductionError::NotFound`] if the article does not exist in that edition
    /// - [`IntroductionError::Upstream`] on transport or protocol failures
    async fn fetch_introduction(
        &self,
        article_name: &str,
        language: &str,
    ) -> Result<String, IntroductionError>;
}
