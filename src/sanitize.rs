//! Filename sanitizing
//!
//! Front texts and deck names end up as media filenames and attachment
//! names, so they must be reduced to a filesystem-safe token. The sanitizer
//! is total: it never returns an empty string and never fails.

use regex::Regex;
use std::sync::OnceLock;

/// Characters allowed to pass through unchanged: `[A-Za-z0-9_\-.]`.
/// Every run of anything else collapses to a single underscore.
// The pattern is a literal; it cannot fail to compile.
#[allow(clippy::expect_used)]
fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\-.]+").expect("valid literal regex"))
}

/// Reduce `raw` to a filesystem-safe token.
///
/// Trims whitespace, collapses disallowed runs to `_`, and falls back when
/// the result is empty: first to `fallback`, then to a generated
/// `card_<unix-seconds>` label. The return value is never empty.
pub fn safe_name(raw: &str, fallback: &str) -> String {
    let cleaned = disallowed().replace_all(raw.trim(), "_").into_owned();
    if !cleaned.is_empty() {
        return cleaned;
    }
    if !fallback.is_empty() {
        return fallback.to_string();
    }
    format!("card_{}", chrono::Utc::now().timestamp())
}
