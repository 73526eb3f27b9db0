//! `url(...)` extraction from CSS values.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\burl\(\s*(?:"([^"]*)"|'([^']*)'|([^'"\s)]*))\s*\)"#)
        .expect("url() pattern is valid")
});

/// Returns the address inside the first `url(...)` of `value`.
///
/// Only the first occurrence is considered: for a multi-layer background or
/// a font `src` fallback list, later entries are ignored. An empty first
/// `url()` yields `None`.
pub fn first_url(value: &str) -> Option<&str> {
    let caps = URL_FUNCTION.captures(value)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim();
    (!raw.is_empty()).then_some(raw)
}
