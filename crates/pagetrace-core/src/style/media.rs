//! Media queries evaluated against a fixed screen viewport.
//!
//! Media types and the `width`, `height`, `aspect-ratio` and `orientation`
//! features (plain, `min-`/`max-` and range forms) are evaluated. Features that
//! cannot be evaluated here (`prefers-*`, `hover`, resolution...) match.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::css::split_top_level;

/// `em`/`rem` in media features are relative to the initial font size.
const INITIAL_FONT_SIZE_PX: f64 = 16.0;

static RANGE_OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<=|>=|<|>|=").expect("range operator pattern is valid"));

/// Screen size the document is laid out for. Written `WIDTHxHEIGHT` in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("expected WIDTHxHEIGHT, got {s:?}");
        let (width, height) = s
            .trim()
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;
        Ok(Self {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for Viewport {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Viewport> for String {
    fn from(viewport: Viewport) -> Self {
        viewport.to_string()
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Viewport {
    /// True if the media query list `media` (an `@media` prelude or a `media`
    /// attribute) matches a screen of this size. An empty list matches.
    pub fn matches(&self, media: &str) -> bool {
        let media = media.trim();
        if media.is_empty() {
            return true;
        }
        split_top_level(media, ',')
            .into_iter()
            .any(|query| self.matches_query(&query.trim().to_ascii_lowercase()))
    }

    fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }
        let (negated, rest) = match strip_keyword(query, "not") {
            Some(rest) => (true, rest),
            None => (false, query),
        };
        let rest = strip_keyword(rest, "only").unwrap_or(rest);

        let matched = if rest.starts_with('(') {
            self.condition(rest)
        } else {
            let (media_type, condition) = match rest.split_once(char::is_whitespace) {
                Some((media_type, condition)) => (media_type, Some(condition)),
                None => (rest, None),
            };
            media_type_matches(media_type)
                && condition
                    .and_then(|c| strip_keyword(c.trim_start(), "and"))
                    .map_or(true, |c| self.condition(c))
        };
        matched != negated
    }

    fn condition(&self, condition: &str) -> bool {
        let condition = condition.trim();
        if let Some(inner) = strip_keyword(condition, "not") {
            return !self.in_parens(inner);
        }
        let all = split_keyword(condition, "and");
        if all.len() > 1 {
            return all.into_iter().all(|c| self.in_parens(c));
        }
        let any = split_keyword(condition, "or");
        if any.len() > 1 {
            return any.into_iter().any(|c| self.in_parens(c));
        }
        self.in_parens(condition)
    }

    fn in_parens(&self, condition: &str) -> bool {
        let Some(inner) = condition
            .trim()
            .strip_prefix('(')
            .and_then(|c| c.strip_suffix(')'))
        else {
            return true;
        };
        let inner = inner.trim();
        if inner.starts_with('(') || strip_keyword(inner, "not").is_some() {
            return self.condition(inner);
        }
        self.feature(inner)
    }

    fn feature(&self, feature: &str) -> bool {
        if let Some((name, value)) = feature.split_once(':') {
            return self.plain_feature(name.trim(), value.trim());
        }
        if RANGE_OPERATOR.is_match(feature) {
            return self.range_feature(feature);
        }
        // Boolean context, e.g. `(color)`.
        true
    }

    fn plain_feature(&self, name: &str, value: &str) -> bool {
        let (op, name) = if let Some(name) = name.strip_prefix("min-") {
            (">=", name)
        } else if let Some(name) = name.strip_prefix("max-") {
            ("<=", name)
        } else {
            ("=", name)
        };
        if name == "orientation" {
            return match value {
                "portrait" => self.height >= self.width,
                "landscape" => self.width > self.height,
                _ => true,
            };
        }
        match (self.dimension(name), parse_value(name, value)) {
            (Some(actual), Some(wanted)) => compare(actual, op, wanted),
            _ => true,
        }
    }

    /// Level 4 range form: `(width >= 600px)`, `(400px < width <= 700px)`.
    fn range_feature(&self, feature: &str) -> bool {
        let operands: Vec<&str> = RANGE_OPERATOR.split(feature).map(str::trim).collect();
        let ops: Vec<&str> = RANGE_OPERATOR.find_iter(feature).map(|m| m.as_str()).collect();
        match (operands.as_slice(), ops.as_slice()) {
            ([left, right], [op]) => {
                if let Some(actual) = self.dimension(left) {
                    parse_value(left, right).map_or(true, |v| compare(actual, op, v))
                } else if let Some(actual) = self.dimension(right) {
                    parse_value(right, left).map_or(true, |v| compare(v, op, actual))
                } else {
                    true
                }
            }
            ([low, name, high], [low_op, high_op]) => {
                let Some(actual) = self.dimension(name) else {
                    return true;
                };
                let low_ok = parse_value(name, low).map_or(true, |v| compare(v, low_op, actual));
                let high_ok =
                    parse_value(name, high).map_or(true, |v| compare(actual, high_op, v));
                low_ok && high_ok
            }
            _ => true,
        }
    }

    fn dimension(&self, name: &str) -> Option<f64> {
        match name {
            "width" | "device-width" => Some(f64::from(self.width)),
            "height" | "device-height" => Some(f64::from(self.height)),
            "aspect-ratio" | "device-aspect-ratio" if self.height > 0 => {
                Some(f64::from(self.width) / f64::from(self.height))
            }
            _ => None,
        }
    }
}

fn media_type_matches(media_type: &str) -> bool {
    matches!(media_type, "all" | "screen")
}

fn compare(left: f64, op: &str, right: f64) -> bool {
    match op {
        "<" => left < right,
        "<=" => left <= right,
        ">" => left > right,
        ">=" => left >= right,
        _ => (left - right).abs() < f64::EPSILON,
    }
}

fn parse_value(feature: &str, value: &str) -> Option<f64> {
    if feature.ends_with("aspect-ratio") {
        let (w, h) = value.split_once('/').unwrap_or((value, "1"));
        let (w, h): (f64, f64) = (w.trim().parse().ok()?, h.trim().parse().ok()?);
        return (h != 0.0).then(|| w / h);
    }
    parse_length(value)
}

fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let split = value
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let number: f64 = value[..split].trim().parse().ok()?;
    match &value[split..] {
        "px" => Some(number),
        "em" | "rem" => Some(number * INITIAL_FONT_SIZE_PX),
        "" if number == 0.0 => Some(0.0),
        _ => None,
    }
}

/// `rest` after a leading `keyword` followed by whitespace or `(`.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    rest.starts_with(|c: char| c.is_whitespace() || c == '(')
        .then(|| rest.trim_start())
}

/// Splits on `keyword` used as a word outside parentheses.
fn split_keyword<'a>(s: &'a str, keyword: &str) -> Vec<&'a str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ if depth == 0
                && i > 0
                && (bytes[i - 1].is_ascii_whitespace() || bytes[i - 1] == b')')
                && s.get(i..).is_some_and(|rest| strip_keyword(rest, keyword).is_some()) =>
            {
                parts.push(&s[start..i]);
                i += keyword.len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&s[start..]);
    parts
}
