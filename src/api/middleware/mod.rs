//! HTTP middleware and extractors for request processing.

pub mod credential;
pub mod tracing;

pub use credential::Credential;
