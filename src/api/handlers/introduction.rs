//! Handler for article introductions.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::introduction::{IntroductionQuery, IntroductionResponse};
use crate::api::middleware::Credential;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the introduction of a Wikipedia article.
///
/// # Endpoint
///
/// `GET /introduction/{article_name}?language={code}`
///
/// # Request Flow
///
/// 1. Validate the language code (defaults to `DEFAULT_LANGUAGE`)
/// 2. Resolve the optional Bearer credential to a user; the user's preferred
///    language replaces the requested one for the lookup
/// 3. Serve from cache (key `wikipedia:{lang}:{article}`) or fetch from
///    Wikipedia and cache the result
///
/// # Response
///
/// ```json
/// {
///   "scrapeDate": 1717171717171,
///   "articleName": "Cat",
///   "introduction": "The cat (Felis catus) is a small carnivorous mammal...",
///   "language": "en"
/// }
/// ```
///
/// `language` always echoes the requested language.
///
/// # Errors
///
/// Returns 400 Bad Request if the language code or article name is invalid.
/// Returns 404 Not Found if the article cannot be served for any reason,
/// including invalid credentials and upstream or cache outages.
pub async fn introduction_handler(
    State(state): State<AppState>,
    Path(article_name): Path<String>,
    Query(query): Query<IntroductionQuery>,
    Credential(credential): Credential,
) -> Result<Json<IntroductionResponse>, AppError> {
    query.validate()?;

    if article_name.trim().is_empty() {
        return Err(AppError::bad_request(
            "Article name must not be empty",
            json!({ "field": "article_name" }),
        ));
    }

    let language = query
        .language
        .unwrap_or_else(|| state.default_language.to_string());

    let introduction = state
        .introduction_service
        .get_introduction(&article_name, &language, credential.as_deref())
        .await?;

    Ok(Json(introduction.into()))
}
