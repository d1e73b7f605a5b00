//! Cache key derivation for article introductions.
//!
//! Keys have the form `wikipedia:{language}:{article}`. Both components are
//! escaped (`%` becomes `%25`, `:` becomes `%3A`) before joining, so a
//! component can never contain the delimiter and distinct
//! `(language, article)` pairs always produce distinct keys. Components
//! without `%` or `:` are left untouched, e.g. `wikipedia:en:Cat`.

use std::borrow::Cow;
use std::fmt;

/// Namespace tag prepended to every introduction key.
pub const NAMESPACE: &str = "wikipedia";

const DELIMITER: char = ':';

/// Cache key for the introduction of one article in one language edition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(language: &str, article_name: &str) -> Self {
        Self(format!(
            "{NAMESPACE}{DELIMITER}{}{DELIMITER}{}",
            escape(language),
            escape(article_name)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape(component: &str) -> Cow<'_, str> {
    if !component.contains(['%', DELIMITER]) {
        return Cow::Borrowed(component);
    }

    let mut escaped = String::with_capacity(component.len() + 4);
    for c in component.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            DELIMITER => escaped.push_str("%3A"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
