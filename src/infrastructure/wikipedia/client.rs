//! Wikipedia HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::source::ArticleSource;
use crate::domain::language::is_valid_language;
use crate::error::IntroductionError;

/// Placeholder replaced by the language code in the base URL.
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
}

/// Client for the MediaWiki action API of a Wikipedia language edition.
///
/// Requests the plain-text lead section of a page:
///
/// ```text
/// GET {base}/w/api.php?action=query&prop=extracts&exintro=1&explaintext=1
///     &redirects=1&format=json&formatversion=2&titles={article}
/// ```
///
/// `base` is derived from the configured base URL by substituting
/// [`LANGUAGE_PLACEHOLDER`] with the language code, e.g.
/// `https://{lang}.wikipedia.org` becomes `https://fr.wikipedia.org`.
pub struct WikipediaClient {
    client: Client,
    base_url: String,
}

impl WikipediaClient {
    /// Creates a client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`IntroductionError::Upstream`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, IntroductionError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                IntroductionError::Upstream(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, language: &str) -> String {
        format!(
            "{}/w/api.php",
            self.base_url.replace(LANGUAGE_PLACEHOLDER, language)
        )
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn fetch_introduction(
        &self,
        article_name: &str,
        language: &str,
    ) -> Result<String, IntroductionError> {
        if !is_valid_language(language) {
            return Err(IntroductionError::Upstream(format!(
                "Refusing to query Wikipedia with language code '{}'",
                language
            )));
        }

        let url = self.endpoint(language);
        debug!("Fetching '{}' from {}", article_name, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", article_name),
            ])
            .send()
            .await
            .map_err(|e| IntroductionError::Upstream(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(IntroductionError::not_found(article_name, language));
        }
        if !status.is_success() {
            return Err(IntroductionError::Upstream(format!(
                "Wikipedia responded with {}",
                status
            )));
        }

        let body: QueryResponse = response.json().await.map_err(|e| {
            IntroductionError::Upstream(format!("Failed to parse response: {}", e))
        })?;

        extract_introduction(body, article_name, language)
    }
}

/// Picks the introduction out of an API response.
///
/// A missing or invalid page, or one without any lead text, counts as not found.
fn extract_introduction(
    body: QueryResponse,
    article_name: &str,
    language: &str,
) -> Result<String, IntroductionError> {
    let page = body
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| IntroductionError::not_found(article_name, language))?;

    if page.missing || page.invalid {
        return Err(IntroductionError::not_found(article_name, language));
    }

    match page.extract.map(|text| text.trim().to_string()) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(IntroductionError::not_found(article_name, language)),
    }
}
