//! Parsed document context: HTML tree, base URL and attached style sheets.
//!
//! Nothing here fetches. External style sheet bodies are handed to the
//! [`DocumentBuilder`] by the caller (for example from a capture), together
//! with whether the response allowed cross-origin reads.

mod sheet;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

pub use sheet::{SecurityError, StyleSheet};

static BASE_ELEMENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("base[href]").expect("valid selector"));
static SHEET_OWNERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("style, link[href]").expect("valid selector"));

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// External style sheet body supplied by the caller.
#[derive(Debug, Clone)]
struct SuppliedSheet {
    href: String,
    css: String,
    cors: bool,
}

/// Builds a [`Document`] from markup plus the bodies of its external sheets.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    url: String,
    sheets: Vec<SuppliedSheet>,
}

impl DocumentBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            sheets: Vec::new(),
        }
    }

    /// Supplies the body of the style sheet at `href`, served without CORS headers.
    pub fn stylesheet(self, href: impl Into<String>, css: impl Into<String>) -> Self {
        self.push_sheet(href.into(), css.into(), false)
    }

    /// Supplies the body of the style sheet at `href`, served with
    /// `Access-Control-Allow-Origin` so that a `crossorigin` link may read its rules.
    pub fn cors_stylesheet(self, href: impl Into<String>, css: impl Into<String>) -> Self {
        self.push_sheet(href.into(), css.into(), true)
    }

    fn push_sheet(mut self, href: String, css: String, cors: bool) -> Self {
        self.sheets.push(SuppliedSheet { href, css, cors });
        self
    }

    pub fn parse(self, html: &str) -> Result<Document, DocumentError> {
        let url = Url::parse(self.url.trim()).map_err(|source| DocumentError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        let html = Html::parse_document(html);
        let base = base_url(&html, &url);

        let mut supplied = HashMap::new();
        for sheet in self.sheets {
            match base.join(sheet.href.trim()) {
                Ok(href) => {
                    supplied.insert(String::from(href), sheet);
                }
                Err(err) => {
                    tracing::warn!(href = %sheet.href, error = %err, "ignoring style sheet with invalid href")
                }
            }
        }

        let sheets = attach_sheets(&html, &url, &base, &supplied);
        tracing::debug!(document = %url, sheets = sheets.len(), "document parsed");
        Ok(Document {
            html,
            url,
            base,
            sheets,
        })
    }
}

/// A parsed HTML document with its attached style sheets.
#[derive(Debug)]
pub struct Document {
    html: Html,
    url: Url,
    base: Url,
    sheets: Vec<StyleSheet>,
}

impl Document {
    /// Parses `html` served from `url`, with no external style sheet bodies.
    pub fn parse(html: &str, url: &str) -> Result<Self, DocumentError> {
        DocumentBuilder::new(url).parse(html)
    }

    pub fn builder(url: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(url)
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Address the document was served from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Base for relative references: the first `<base href>`, else the document url.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Attached style sheets in document order.
    pub fn style_sheets(&self) -> &[StyleSheet] {
        &self.sheets
    }

    /// Resolves an attribute value against the base URL.
    ///
    /// Leading and trailing whitespace is stripped; empty values and values
    /// that do not resolve yield `None`.
    pub fn resolve(&self, raw: &str) -> Option<Url> {
        resolve_against(&self.base, raw)
    }
}

pub(crate) fn resolve_against(base: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match base.join(raw) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::trace!(raw, error = %err, "unresolvable reference skipped");
            None
        }
    }
}

fn base_url(html: &Html, document_url: &Url) -> Url {
    html.select(&BASE_ELEMENT)
        .next()
        .and_then(|base| base.value().attr("href"))
        .and_then(|href| resolve_against(document_url, href))
        .unwrap_or_else(|| document_url.clone())
}

fn attach_sheets(
    html: &Html,
    document_url: &Url,
    base: &Url,
    supplied: &HashMap<String, SuppliedSheet>,
) -> Vec<StyleSheet> {
    let mut sheets = Vec::new();
    for owner in html.select(&SHEET_OWNERS) {
        match owner.value().name() {
            "style" if is_css_type(owner) => {
                let css: String = owner.text().collect();
                sheets.push(StyleSheet::inline(&css, base.clone()).with_media(media_of(owner)));
            }
            "link" if has_rel(owner, "stylesheet") => {
                let Some(href) = owner.value().attr("href").and_then(|h| resolve_against(base, h))
                else {
                    continue;
                };
                let Some(body) = supplied.get(href.as_str()) else {
                    tracing::trace!(%href, "style sheet body not supplied; not attached");
                    continue;
                };
                let origin_clean = href.origin() == document_url.origin()
                    || (owner.value().attr("crossorigin").is_some() && body.cors);
                let mut sheet =
                    StyleSheet::external(href, &body.css, origin_clean).with_media(media_of(owner));
                if has_rel(owner, "alternate") {
                    sheet = sheet.as_alternate();
                }
                sheets.push(sheet);
            }
            _ => {}
        }
    }
    sheets
}

fn media_of(owner: ElementRef<'_>) -> &str {
    owner.value().attr("media").unwrap_or("").trim()
}

fn is_css_type(style: ElementRef<'_>) -> bool {
    match style.value().attr("type").map(str::trim) {
        None | Some("") => true,
        Some(ty) => ty.eq_ignore_ascii_case("text/css"),
    }
}

/// True if the element's `rel` attribute contains `token` (ASCII case-insensitive).
pub(crate) fn has_rel(element: ElementRef<'_>, token: &str) -> bool {
    element
        .value()
        .attr("rel")
        .map(|rel| rel.split_ascii_whitespace().any(|t| t.eq_ignore_ascii_case(token)))
        .unwrap_or(false)
}
