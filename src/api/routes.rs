//! API route configuration.

use crate::api::handlers::{health_handler, introduction_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /introduction/{article_name}` - Article introduction (optional Bearer credential)
/// - `GET /health`                      - Health check: database and cache
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/introduction/{article_name}", get(introduction_handler))
        .route("/health", get(health_handler))
}
