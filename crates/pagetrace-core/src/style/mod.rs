//! Computed `background-image` for every element of a document.
//!
//! A reduced cascade: only the declarations that can set `background-image`
//! (the longhand and the `background` shorthand) take part. Winners are chosen
//! by importance, then inline-over-sheet, then selector specificity, then
//! source order. Sheets and `@media` blocks apply only when their media
//! matches the [`Viewport`].

mod cascade;
mod media;

use std::collections::HashMap;

use scraper::ElementRef;
use url::Url;

use crate::css::first_url;
use crate::document::{resolve_against, Document};

use cascade::{CascadeRules, Winner};

pub use media::Viewport;

/// Resolved background image of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedBackground {
    /// Local name of the element (`div`, `body`, ...).
    pub element: String,
    pub url: Url,
}

/// Computes the background image of every element in tree order and returns
/// those that resolve to an address, as laid out on a screen of `viewport`.
/// Read-only with respect to `document`.
pub fn background_images(document: &Document, viewport: &Viewport) -> Vec<ComputedBackground> {
    let rules = CascadeRules::collect(document, viewport);
    let root = document.html().root_element();

    let mut computed: HashMap<_, Option<Url>> = HashMap::new();
    let mut found = Vec::new();
    for node in root.descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        let value = match rules.winner(element) {
            Some(Winner::Inherit) => element
                .parent()
                .and_then(|parent| computed.get(&parent.id()).cloned())
                .flatten(),
            Some(Winner::Value { value, base }) => {
                first_url(&value).and_then(|raw| resolve_against(base, raw))
            }
            None => None,
        };
        if let Some(url) = &value {
            found.push(ComputedBackground {
                element: element.value().name().to_string(),
                url: url.clone(),
            });
        }
        computed.insert(node.id(), value);
    }
    tracing::trace!(count = found.len(), "computed background images");
    found
}
