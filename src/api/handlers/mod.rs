//! HTTP request handlers for API endpoints.

pub mod health;
pub mod introduction;

pub use health::health_handler;
pub use introduction::introduction_handler;
