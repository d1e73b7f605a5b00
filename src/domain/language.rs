//! Wikipedia language edition codes.

use regex::Regex;
use std::sync::LazyLock;

/// Language edition codes (`en`, `fr`, `zh-yue`, `be-tarask`, ...).
///
/// The code becomes part of the upstream host name, so only lowercase
/// letters, digits and inner hyphens are accepted.
pub static LANGUAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[a-z0-9]+)*$").unwrap());

pub const MIN_LANGUAGE_LEN: usize = 2;
pub const MAX_LANGUAGE_LEN: usize = 12;

/// Returns `true` if `code` is a well-formed language edition code.
pub fn is_valid_language(code: &str) -> bool {
    (MIN_LANGUAGE_LEN..=MAX_LANGUAGE_LEN).contains(&code.len()) && LANGUAGE_REGEX.is_match(code)
}
