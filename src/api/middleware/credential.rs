//! Optional Bearer credential extractor.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_auth::AuthBearer;
use std::convert::Infallible;
use tracing::debug;

/// Credential supplied with a request, if any.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Extraction Rules
///
/// - No `Authorization` header: anonymous (`None`)
/// - Well-formed Bearer header: `Some(token)`
/// - Any other `Authorization` value: `Some(raw value)`, which fails
///   validation downstream like any unknown credential
///
/// Extraction never rejects the request; credential problems surface through
/// the normal lookup error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(pub Option<String>);

impl<S> FromRequestParts<S> for Credential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Self(None));
        };
        let raw = raw.to_str().unwrap_or_default().to_string();

        match AuthBearer::from_request_parts(parts, &()).await {
            Ok(AuthBearer(token)) => Ok(Self(Some(token))),
            Err(_) => {
                debug!("Malformed Authorization header");
                Ok(Self(Some(raw)))
            }
        }
    }
}
