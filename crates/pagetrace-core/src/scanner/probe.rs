//! The ordered probe table.
//!
//! Each probe pairs an extraction function with the rule that tags what it
//! finds. The scanner runs probes in table order, so a reference matched by
//! two probes keeps the tag of the one listed first.

use once_cell::sync::Lazy;
use scraper::node::Element;
use scraper::Selector;
use url::Url;

use crate::config::ScannerConfig;
use crate::css::{first_url, walk_rules, CssRule};
use crate::document::{resolve_against, Document};
use crate::style::background_images;

use super::ResourceKind;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("probe selectors are valid")
}

static LINKS: Lazy<Selector> = Lazy::new(|| selector("link[href]"));
static SCRIPTS: Lazy<Selector> = Lazy::new(|| selector("script[src]"));
static IMAGES: Lazy<Selector> = Lazy::new(|| {
    selector(r#"img[src], source[src], input[type="image" i][src], svg image"#)
});
static VIDEOS: Lazy<Selector> = Lazy::new(|| selector("video[src]"));
static POSTERS: Lazy<Selector> = Lazy::new(|| selector("video[poster]"));
static AUDIO: Lazy<Selector> = Lazy::new(|| selector("audio[src]"));
static EMBEDDED: Lazy<Selector> = Lazy::new(|| selector("iframe[src], embed[src]"));
static OBJECTS: Lazy<Selector> = Lazy::new(|| selector("object[data]"));

/// One resolved address produced by a probe.
#[derive(Debug, Clone)]
pub(crate) struct Found {
    pub(crate) url: Url,
    /// Raw `rel` of the owning `<link>`, for link probes.
    pub(crate) relation: Option<String>,
}

impl Found {
    fn plain(url: Url) -> Self {
        Self {
            url,
            relation: None,
        }
    }
}

pub(crate) enum KindRule {
    Fixed(ResourceKind),
    /// `stylesheet` when `rel` names it, else the raw `rel` string.
    LinkRelation,
}

impl KindRule {
    pub(crate) fn classify(&self, found: &Found) -> ResourceKind {
        match self {
            KindRule::Fixed(kind) => kind.clone(),
            KindRule::LinkRelation => match found.relation.as_deref() {
                Some(rel) if !rel_contains(rel, |t| t.eq_ignore_ascii_case("stylesheet")) => {
                    ResourceKind::LinkRelation(rel.to_string())
                }
                _ => ResourceKind::Stylesheet,
            },
        }
    }
}

/// What a probe looks at: the document and the scan options.
pub(crate) struct ProbeContext<'a> {
    pub(crate) document: &'a Document,
    pub(crate) config: &'a ScannerConfig,
}

pub(crate) struct Probe {
    pub(crate) name: &'static str,
    pub(crate) extract: fn(&ProbeContext<'_>) -> Vec<Found>,
    pub(crate) kind: KindRule,
}

pub(crate) static PROBES: [Probe; 10] = [
    Probe {
        name: "links",
        extract: stylesheet_and_icon_links,
        kind: KindRule::LinkRelation,
    },
    Probe {
        name: "scripts",
        extract: script_sources,
        kind: KindRule::Fixed(ResourceKind::Script),
    },
    Probe {
        name: "images",
        extract: image_sources,
        kind: KindRule::Fixed(ResourceKind::Image),
    },
    Probe {
        name: "video-sources",
        extract: video_sources,
        kind: KindRule::Fixed(ResourceKind::Video),
    },
    Probe {
        name: "video-posters",
        extract: video_posters,
        kind: KindRule::Fixed(ResourceKind::VideoPoster),
    },
    Probe {
        name: "audio",
        extract: audio_sources,
        kind: KindRule::Fixed(ResourceKind::Audio),
    },
    Probe {
        name: "css-backgrounds",
        extract: css_backgrounds,
        kind: KindRule::Fixed(ResourceKind::CssBackgroundImage),
    },
    Probe {
        name: "embedded",
        extract: embedded_sources,
        kind: KindRule::Fixed(ResourceKind::EmbeddedContent),
    },
    Probe {
        name: "objects",
        extract: object_data,
        kind: KindRule::Fixed(ResourceKind::ObjectData),
    },
    Probe {
        name: "fonts",
        extract: font_faces,
        kind: KindRule::Fixed(ResourceKind::Font),
    },
];

fn rel_contains(rel: &str, pred: impl Fn(&str) -> bool) -> bool {
    rel.split_ascii_whitespace().any(pred)
}

fn attribute_values(doc: &Document, selector: &Selector, attr: &str) -> Vec<Found> {
    doc.html()
        .select(selector)
        .filter_map(|el| el.value().attr(attr))
        .filter_map(|raw| doc.resolve(raw))
        .map(Found::plain)
        .collect()
}

fn stylesheet_and_icon_links(cx: &ProbeContext<'_>) -> Vec<Found> {
    let doc = cx.document;
    doc.html()
        .select(&LINKS)
        .filter_map(|el| {
            let rel = el.value().attr("rel")?.trim();
            let wanted = rel_contains(rel, |t| {
                t.eq_ignore_ascii_case("stylesheet") || t.to_ascii_lowercase().ends_with("icon")
            });
            if !wanted {
                return None;
            }
            let url = doc.resolve(el.value().attr("href")?)?;
            Some(Found {
                url,
                relation: Some(rel.to_string()),
            })
        })
        .collect()
}

/// `xlink:href` lands in the XLink namespace, which `Element::attr` does not
/// look at; `attrs()` reports it under its local name.
fn xlink_href(el: &Element) -> Option<&str> {
    el.attrs()
        .find(|(name, _)| *name == "href")
        .map(|(_, value)| value)
}

fn script_sources(cx: &ProbeContext<'_>) -> Vec<Found> {
    attribute_values(cx.document, &SCRIPTS, "src")
}

fn image_sources(cx: &ProbeContext<'_>) -> Vec<Found> {
    let doc = cx.document;
    doc.html()
        .select(&IMAGES)
        .filter_map(|el| {
            let el = el.value();
            if el.name() == "image" {
                // SVG <image>: `href`, or legacy `xlink:href`.
                el.attr("href").or_else(|| xlink_href(el))
            } else {
                el.attr("src")
            }
        })
        .filter_map(|raw| doc.resolve(raw))
        .map(Found::plain)
        .collect()
}

fn video_sources(cx: &ProbeContext<'_>) -> Vec<Found> {
    attribute_values(cx.document, &VIDEOS, "src")
}

fn video_posters(cx: &ProbeContext<'_>) -> Vec<Found> {
    attribute_values(cx.document, &POSTERS, "poster")
}

fn audio_sources(cx: &ProbeContext<'_>) -> Vec<Found> {
    attribute_values(cx.document, &AUDIO, "src")
}

fn css_backgrounds(cx: &ProbeContext<'_>) -> Vec<Found> {
    background_images(cx.document, &cx.config.viewport)
        .into_iter()
        .map(|bg| Found::plain(bg.url))
        .collect()
}

fn embedded_sources(cx: &ProbeContext<'_>) -> Vec<Found> {
    attribute_values(cx.document, &EMBEDDED, "src")
}

fn object_data(cx: &ProbeContext<'_>) -> Vec<Found> {
    attribute_values(cx.document, &OBJECTS, "data")
}

fn font_faces(cx: &ProbeContext<'_>) -> Vec<Found> {
    let mut found = Vec::new();
    for sheet in cx.document.style_sheets() {
        let rules = match sheet.css_rules() {
            Ok(rules) => rules,
            Err(err) => {
                tracing::debug!(error = %err, "style sheet skipped for font discovery");
                continue;
            }
        };
        walk_rules(rules, &mut |rule| {
            let CssRule::FontFace(face) = rule else {
                return;
            };
            let url = face
                .src()
                .and_then(first_url)
                .and_then(|raw| resolve_against(sheet.base_url(), raw));
            if let Some(url) = url {
                found.push(Found::plain(url));
            }
        });
    }
    found
}
