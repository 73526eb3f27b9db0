//! Attached style sheets and their origin-clean flag.

use std::fmt;

use url::Url;

use crate::css::{parse_stylesheet, CssRule};

/// Raised when script-level code enumerates the rules of a style sheet whose
/// origin does not allow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityError {
    pub href: Option<Url>,
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.href {
            Some(href) => write!(f, "cannot access rules of cross-origin style sheet {href}"),
            None => write!(f, "cannot access rules of cross-origin style sheet"),
        }
    }
}

impl std::error::Error for SecurityError {}

/// A style sheet attached to a [`Document`](super::Document), either from a
/// `<style>` element or a `<link rel="stylesheet">`.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    href: Option<Url>,
    base: Url,
    origin_clean: bool,
    media: String,
    alternate: bool,
    rules: Vec<CssRule>,
}

impl StyleSheet {
    /// Sheet from a `<style>` element. Always origin-clean.
    pub fn inline(css: &str, document_base: Url) -> Self {
        Self {
            href: None,
            base: document_base,
            origin_clean: true,
            media: String::new(),
            alternate: false,
            rules: parse_stylesheet(css),
        }
    }

    /// Sheet loaded from `href`. Relative `url()` values resolve against `href`.
    pub fn external(href: Url, css: &str, origin_clean: bool) -> Self {
        Self {
            base: href.clone(),
            href: Some(href),
            origin_clean,
            media: String::new(),
            alternate: false,
            rules: parse_stylesheet(css),
        }
    }

    /// Restricts the sheet to the media query list of its owner's `media` attribute.
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    /// Marks the sheet as an alternate style sheet (`rel="alternate stylesheet"`),
    /// which is attached but not applied.
    pub fn as_alternate(mut self) -> Self {
        self.alternate = true;
        self
    }

    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    /// Base for resolving relative `url()` values inside this sheet.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn is_origin_clean(&self) -> bool {
        self.origin_clean
    }

    /// Media query list the sheet applies to. Empty means all media.
    pub fn media(&self) -> &str {
        &self.media
    }

    pub fn is_alternate(&self) -> bool {
        self.alternate
    }

    /// Rule list as exposed to scripts: denied for cross-origin sheets.
    pub fn css_rules(&self) -> Result<&[CssRule], SecurityError> {
        if self.origin_clean {
            Ok(&self.rules)
        } else {
            Err(SecurityError {
                href: self.href.clone(),
            })
        }
    }

    /// Rule list as seen by the style engine. Cross-origin sheets still
    /// style the document even though their rules are not enumerable.
    pub(crate) fn cascade_rules(&self) -> &[CssRule] {
        &self.rules
    }
}
