//! Route slugs for published events.

use regex::Regex;
use std::sync::LazyLock;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

/// Turn a title into a URL-safe page name: lowercase ASCII alphanumerics
/// separated by single dashes.
///
/// "Rust Meetup: Q4_2025!" → "rust-meetup-q4-2025"
pub fn slugify(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    NON_ALNUM
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}
