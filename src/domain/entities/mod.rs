//! Core domain entities.
//!
//! - [`Introduction`] - Introduction returned to callers
//! - [`CacheEntry`] - Stored introduction text with its scrape timestamp
//! - [`UserProfile`] - Registered user and their preferred language

pub mod introduction;
pub mod user;

pub use introduction::{CacheEntry, Introduction};
pub use user::UserProfile;
