//! Error types shared across the service.
//!
//! - [`IntroductionError`] - failures inside the introduction lookup pipeline
//! - [`AppError`] - HTTP-facing error rendered as a JSON body

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::infrastructure::cache::CacheError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload embedded in every non-2xx JSON response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Failures raised while resolving an article introduction.
///
/// Only [`IntroductionError::NotFound`] ever leaves
/// [`crate::application::services::IntroductionService`]; every other kind is
/// collapsed into it at that boundary.
#[derive(Debug, Error)]
pub enum IntroductionError {
    #[error("Article '{article}' not found in {language} Wikipedia")]
    NotFound { article: String, language: String },

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl IntroductionError {
    pub fn not_found(article: impl Into<String>, language: impl Into<String>) -> Self {
        Self::NotFound {
            article: article.into(),
            language: language.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<IntroductionError> for AppError {
    fn from(e: IntroductionError) -> Self {
        match e {
            IntroductionError::NotFound {
                ref article,
                ref language,
            } => {
                let details = json!({ "article_name": article, "language": language });
                AppError::not_found(e.to_string(), details)
            }
            other => AppError::internal(
                "Introduction lookup failed",
                json!({ "reason": other.to_string() }),
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request parameters", json!({ "reason": e.to_string() }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!("Database error: {}", e);
    AppError::internal("Database error", json!({}))
}
