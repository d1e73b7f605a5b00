//! Upstream article source.
//!
//! - [`ArticleSource`] - Trait for fetching introduction text
//! - [`WikipediaClient`] - MediaWiki action API client

mod client;
mod source;

pub use client::{LANGUAGE_PLACEHOLDER, WikipediaClient};
pub use source::ArticleSource;

#[cfg(test)]
pub use source::MockArticleSource;
