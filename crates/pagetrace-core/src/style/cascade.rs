//! Rule collection and winner selection for `background-image`.

use std::borrow::Cow;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::css::{
    parse_declarations, specificity, split_selector_list, CssRule, Declaration, Specificity,
    StyleRule,
};
use crate::document::Document;

use super::Viewport;

/// Properties that set `background-image`.
const BACKGROUND_PROPERTIES: &[&str] = &["background", "background-image"];

/// `(important, inline, specificity, source order)`; greater wins.
type Rank = (bool, bool, Specificity, usize);

pub(super) enum Winner<'a> {
    Inherit,
    Value { value: Cow<'a, str>, base: &'a Url },
}

struct SheetDeclaration<'a> {
    value: &'a str,
    important: bool,
    order: usize,
}

struct CompiledRule<'a> {
    selectors: Vec<(Selector, Specificity)>,
    declarations: Vec<SheetDeclaration<'a>>,
    base: &'a Url,
}

impl CompiledRule<'_> {
    /// Specificity of the most specific selector in the list matching `element`.
    fn matching_specificity(&self, element: &ElementRef<'_>) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|(selector, _)| selector.matches(element))
            .map(|(_, spec)| *spec)
            .max()
    }
}

/// Every applicable style rule that declares a background.
pub(super) struct CascadeRules<'a> {
    rules: Vec<CompiledRule<'a>>,
    document_base: &'a Url,
}

impl<'a> CascadeRules<'a> {
    /// Collects from sheets that apply on `viewport`: alternate sheets and
    /// sheets or `@media` blocks whose media does not match are left out.
    pub(super) fn collect(document: &'a Document, viewport: &Viewport) -> Self {
        let mut rules = Vec::new();
        let mut order = 0usize;
        for sheet in document.style_sheets() {
            if sheet.is_alternate() || !viewport.matches(sheet.media()) {
                tracing::trace!(
                    href = ?sheet.href().map(|u| u.as_str()),
                    media = sheet.media(),
                    "style sheet does not apply"
                );
                continue;
            }
            walk_applicable(sheet.cascade_rules(), viewport, &mut |style| {
                let declarations: Vec<_> = style
                    .declarations
                    .iter()
                    .filter(|d| is_background(d))
                    .map(|d| {
                        order += 1;
                        SheetDeclaration {
                            value: &d.value,
                            important: d.important,
                            order,
                        }
                    })
                    .collect();
                if declarations.is_empty() {
                    return;
                }
                let selectors = compile_selectors(&style.selector_text);
                if selectors.is_empty() {
                    return;
                }
                rules.push(CompiledRule {
                    selectors,
                    declarations,
                    base: sheet.base_url(),
                });
            });
        }
        Self {
            rules,
            document_base: document.base_url(),
        }
    }

    /// Cascade winner for `element`, or `None` when nothing declares a background.
    pub(super) fn winner(&self, element: ElementRef<'a>) -> Option<Winner<'a>> {
        let mut best: Option<(Rank, Winner<'a>)> = None;
        for rule in &self.rules {
            let Some(spec) = rule.matching_specificity(&element) else {
                continue;
            };
            for decl in &rule.declarations {
                consider(
                    &mut best,
                    (decl.important, false, spec, decl.order),
                    Cow::Borrowed(decl.value),
                    rule.base,
                );
            }
        }
        if let Some(style) = element.value().attr("style") {
            let inline = parse_declarations(style)
                .into_iter()
                .filter(is_background)
                .enumerate();
            for (index, decl) in inline {
                consider(
                    &mut best,
                    (decl.important, true, Specificity::default(), index),
                    Cow::Owned(decl.value),
                    self.document_base,
                );
            }
        }
        best.map(|(_, winner)| winner)
    }
}

fn walk_applicable<'a>(
    rules: &'a [CssRule],
    viewport: &Viewport,
    visit: &mut dyn FnMut(&'a StyleRule),
) {
    for rule in rules {
        match rule {
            CssRule::Style(style) => visit(style),
            CssRule::Group(group) if group.name == "media" && !viewport.matches(&group.condition) => {}
            CssRule::Group(group) => walk_applicable(&group.rules, viewport, visit),
            CssRule::FontFace(_) => {}
        }
    }
}

fn consider<'a>(
    best: &mut Option<(Rank, Winner<'a>)>,
    rank: Rank,
    value: Cow<'a, str>,
    base: &'a Url,
) {
    if best.as_ref().is_some_and(|(current, _)| *current > rank) {
        return;
    }
    let winner = if value.trim().eq_ignore_ascii_case("inherit") {
        Winner::Inherit
    } else {
        Winner::Value { value, base }
    };
    *best = Some((rank, winner));
}

fn is_background(decl: &Declaration) -> bool {
    BACKGROUND_PROPERTIES.contains(&decl.name.as_str())
}

fn compile_selectors(selector_text: &str) -> Vec<(Selector, Specificity)> {
    split_selector_list(selector_text)
        .into_iter()
        .filter_map(|part| match Selector::parse(part) {
            Ok(selector) => Some((selector, specificity(part))),
            Err(_) => {
                tracing::trace!(selector = part, "unsupported selector skipped");
                None
            }
        })
        .collect()
}
