//! DTOs for the introduction endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Introduction;
use crate::domain::language::LANGUAGE_REGEX;

/// Query parameters of `GET /introduction/{article_name}`.
#[derive(Debug, Deserialize, Validate)]
pub struct IntroductionQuery {
    /// Requested language edition; the configured default when omitted.
    #[validate(length(min = 2, max = 12))]
    #[validate(regex(path = "*LANGUAGE_REGEX", message = "Invalid language code"))]
    pub language: Option<String>,
}

/// Introduction of an article.
///
/// `language` is the language the caller requested, which may differ from the
/// language `introduction` is written in when the caller has a preferred
/// language set.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroductionResponse {
    pub scrape_date: i64,
    pub article_name: String,
    pub introduction: String,
    pub language: String,
}

impl From<Introduction> for IntroductionResponse {
    fn from(intro: Introduction) -> Self {
        Self {
            scrape_date: intro.scrape_date,
            article_name: intro.article_name,
            introduction: intro.introduction,
            language: intro.language,
        }
    }
}
