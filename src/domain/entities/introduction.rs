//! Introduction entities.

use serde::{Deserialize, Serialize};

/// Introduction text stored in the cache together with its scrape time.
///
/// Serialized as `{"introduction": "...", "scrapeDate": 1700000000000}`.
/// A cache hit returns `scrape_date` exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub introduction: String,
    /// Epoch milliseconds at which the text was fetched from Wikipedia.
    pub scrape_date: i64,
}

impl CacheEntry {
    pub fn new(introduction: impl Into<String>, scrape_date: i64) -> Self {
        Self {
            introduction: introduction.into(),
            scrape_date,
        }
    }

    /// Serializes the entry into the string form kept by the cache store.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses an entry previously written with [`CacheEntry::to_json`].
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Introduction of an article as returned to the caller.
///
/// `article_name` and `language` echo the request verbatim. When the caller's
/// preferred language overrides the request, `introduction` is written in the
/// preferred language while `language` still reports the requested one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Introduction {
    pub scrape_date: i64,
    pub article_name: String,
    pub introduction: String,
    pub language: String,
}
