//! Tolerant rule and declaration parser.

use super::{CssRule, Declaration, FontFaceRule, GroupRule, StyleRule};

/// At-rules whose block contains nested rules rather than declarations.
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "layer",
    "container",
    "document",
    "-moz-document",
    "scope",
    "starting-style",
];

/// Parses a style sheet body into rules, in source order.
pub fn parse_stylesheet(css: &str) -> Vec<CssRule> {
    parse_rules(&strip_comments(css))
}

/// Parses a declaration block (the inside of `{ ... }` or a `style` attribute).
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    let block = strip_comments(block);
    split_top_level(&block, ';')
        .into_iter()
        .filter_map(parse_declaration)
        .collect()
}

/// Splits a selector list on top-level commas, dropping empty parts.
pub fn split_selector_list(selector_text: &str) -> Vec<&str> {
    split_top_level(selector_text, ',')
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_rules(input: &str) -> Vec<CssRule> {
    let mut rules = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        // Leftovers of a malformed rule.
        if rest.starts_with('}') || rest.starts_with(';') {
            rest = &rest[1..];
            continue;
        }
        let Some(end) = find_top_level(rest, &['{', ';']) else {
            break;
        };
        let prelude = rest[..end].trim();
        if rest.as_bytes()[end] == b';' {
            // Statement at-rules (@import, @charset, @namespace, @layer a, b;).
            rest = &rest[end + 1..];
            continue;
        }
        let body_and_rest = &rest[end + 1..];
        let body_len = find_top_level(body_and_rest, &['}']).unwrap_or(body_and_rest.len());
        let body = &body_and_rest[..body_len];
        rest = body_and_rest.get(body_len + 1..).unwrap_or("");

        if let Some(rule) = build_rule(prelude, body) {
            rules.push(rule);
        }
    }
    rules
}

fn build_rule(prelude: &str, body: &str) -> Option<CssRule> {
    if let Some(at) = prelude.strip_prefix('@') {
        let name_end = at
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(at.len());
        let name = at[..name_end].to_ascii_lowercase();
        if name == "font-face" {
            return Some(CssRule::FontFace(FontFaceRule {
                declarations: parse_declarations(body),
            }));
        }
        if GROUPING_AT_RULES.contains(&name.as_str()) {
            return Some(CssRule::Group(GroupRule {
                condition: at[name_end..].trim().to_string(),
                name,
                rules: parse_rules(body),
            }));
        }
        // @keyframes, @page, @font-feature-values, vendor at-rules.
        return None;
    }
    if prelude.is_empty() {
        return None;
    }
    Some(CssRule::Style(StyleRule {
        selector_text: prelude.to_string(),
        declarations: parse_declarations(body),
    }))
}

fn parse_declaration(chunk: &str) -> Option<Declaration> {
    let chunk = chunk.trim();
    // Nested rules (CSS nesting) are not declarations.
    if chunk.is_empty() || chunk.contains('{') {
        return None;
    }
    let (name, value) = chunk.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    let (value, important) = strip_important(value.trim());
    Some(Declaration {
        name: name.to_ascii_lowercase(),
        value: value.to_string(),
        important,
    })
}

fn strip_important(value: &str) -> (&str, bool) {
    if let Some(idx) = value.rfind('!') {
        if value[idx + 1..].trim().eq_ignore_ascii_case("important") {
            return (value[..idx].trim_end(), true);
        }
    }
    (value, false)
}

/// Byte offset of the first char in `stops` that sits outside strings,
/// parentheses and nested blocks.
fn find_top_level(s: &str, stops: &[char]) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut parens = 0usize;
    let mut braces = 0usize;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            _ if parens == 0 && braces == 0 && stops.contains(&c) => return Some(i),
            '{' => braces += 1,
            '}' => braces = braces.saturating_sub(1),
            _ => {}
        }
    }
    None
}

pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(idx) = find_top_level(rest, &[sep]) {
        parts.push(&rest[..idx]);
        rest = &rest[idx + sep.len_utf8()..];
    }
    parts.push(rest);
    parts
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = '\0';
            for inner in chars.by_ref() {
                if prev == '*' && inner == '/' {
                    break;
                }
                prev = inner;
            }
            // A comment separates tokens.
            out.push(' ');
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        out.push(c);
    }
    out
}
