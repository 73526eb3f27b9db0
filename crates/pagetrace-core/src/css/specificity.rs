//! Selector specificity, computed syntactically from selector text.

use std::ops::Add;

/// `(ids, classes + attributes + pseudo-classes, types + pseudo-elements)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

/// Single-colon spellings that still denote pseudo-elements.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Specificity of one complex selector (no top-level commas).
///
/// `:is()`, `:not()` and `:has()` take the most specific argument,
/// `:where()` contributes nothing.
pub fn specificity(selector: &str) -> Specificity {
    let chars: Vec<char> = selector.chars().collect();
    let mut spec = Specificity::default();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '#' => {
                spec.0 += 1;
                i = skip_ident(&chars, i + 1);
            }
            '.' => {
                spec.1 += 1;
                i = skip_ident(&chars, i + 1);
            }
            '[' => {
                spec.1 += 1;
                i = chars[i..]
                    .iter()
                    .position(|&c| c == ']')
                    .map_or(chars.len(), |p| i + p + 1);
            }
            ':' if chars.get(i + 1) == Some(&':') => {
                spec.2 += 1;
                i = skip_ident(&chars, i + 2);
                if chars.get(i) == Some(&'(') {
                    i = closing_paren(&chars, i) + 1;
                }
            }
            ':' => {
                let end = skip_ident(&chars, i + 1);
                let name: String = chars[i + 1..end].iter().collect::<String>().to_ascii_lowercase();
                if chars.get(end) == Some(&'(') {
                    let close = closing_paren(&chars, end);
                    let inner: String = chars[end + 1..close.min(chars.len())].iter().collect();
                    match name.as_str() {
                        "where" => {}
                        "is" | "not" | "has" | "matches" | "-webkit-any" => {
                            spec = spec + most_specific(&inner);
                        }
                        _ => spec.1 += 1,
                    }
                    i = close + 1;
                } else {
                    if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
                        spec.2 += 1;
                    } else {
                        spec.1 += 1;
                    }
                    i = end;
                }
            }
            c if is_ident_start(c) => {
                spec.2 += 1;
                i = skip_ident(&chars, i);
            }
            _ => i += 1,
        }
    }
    spec
}

fn most_specific(list: &str) -> Specificity {
    super::split_selector_list(list)
        .into_iter()
        .map(specificity)
        .max()
        .unwrap_or_default()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn skip_ident(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 2;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii() {
            i += 1;
        } else {
            break;
        }
    }
    i.min(chars.len())
}

/// Index of the `)` matching the `(` at `open`, or `chars.len()` if unbalanced.
fn closing_paren(chars: &[char], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_selectors() {
        assert_eq!(specificity("*"), Specificity(0, 0, 0));
        assert_eq!(specificity("div"), Specificity(0, 0, 1));
        assert_eq!(specificity(".hero"), Specificity(0, 1, 0));
        assert_eq!(specificity("#main"), Specificity(1, 0, 0));
    }

    #[test]
    fn compound_and_complex_selectors() {
        assert_eq!(specificity("ul#nav li.active > a"), Specificity(1, 1, 3));
        assert_eq!(specificity("a[href^='http']:hover"), Specificity(0, 2, 1));
        assert_eq!(specificity("p::first-line"), Specificity(0, 0, 2));
        assert_eq!(specificity("p:before"), Specificity(0, 0, 2));
        assert_eq!(specificity("li:nth-child(2n + 1)"), Specificity(0, 1, 1));
    }

    #[test]
    fn functional_pseudo_classes() {
        assert_eq!(specificity(":where(#a, .b) p"), Specificity(0, 0, 1));
        assert_eq!(specificity(":is(#a, .b) p"), Specificity(1, 0, 1));
        assert_eq!(specificity("div:not(.x)"), Specificity(0, 1, 1));
    }

    #[test]
    fn ordering_compares_ids_first() {
        assert!(specificity("#a") > specificity(".b.c.d.e"));
        assert!(specificity(".b") > specificity("html body div p"));
    }
}
