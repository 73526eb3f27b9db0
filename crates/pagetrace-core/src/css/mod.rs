//! Minimal CSS object model: just enough structure to answer which rules
//! declare background images and which `@font-face` rules name font files.
//!
//! Parsing is tolerant. Malformed input never fails; unknown at-rules and
//! unparseable fragments are dropped.

mod parse;
mod specificity;
mod url_fn;

pub use parse::{parse_declarations, parse_stylesheet, split_selector_list};
pub(crate) use parse::split_top_level;
pub use specificity::{specificity, Specificity};
pub use url_fn::first_url;

/// A single `name: value` declaration. `name` is ASCII-lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// `selector { declarations }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector_text: String,
    pub declarations: Vec<Declaration>,
}

/// `@font-face { descriptors }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    pub declarations: Vec<Declaration>,
}

impl FontFaceRule {
    /// Value of the last `src` descriptor, if any.
    pub fn src(&self) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.name == "src")
            .map(|d| d.value.as_str())
    }
}

/// Conditional or layering at-rule (`@media`, `@supports`, `@layer`, ...)
/// holding nested rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub name: String,
    pub condition: String,
    pub rules: Vec<CssRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
    Style(StyleRule),
    FontFace(FontFaceRule),
    Group(GroupRule),
}

/// Depth-first walk over `rules`, descending into group rules.
pub fn walk_rules<'a>(rules: &'a [CssRule], visit: &mut dyn FnMut(&'a CssRule)) {
    for rule in rules {
        match rule {
            CssRule::Group(group) => walk_rules(&group.rules, visit),
            other => visit(other),
        }
    }
}
