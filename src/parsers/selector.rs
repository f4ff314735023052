//! Selector lists and the simple selector grammar of the tree backend

use std::sync::OnceLock;

use regex::Regex;

use crate::parsers::ParserError;

/// Splits a selector list on top-level commas.
///
/// Commas inside quotes, brackets or parentheses do not split. Empty entries
/// (including an empty pattern) are rejected.
pub fn split_selector_list(pattern: &str) -> Result<Vec<&str>, ParserError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in pattern.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(pattern[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(pattern[start..].trim());

    if parts.iter().any(|part| part.is_empty()) {
        return Err(ParserError::InvalidSelector {
            selector: pattern.to_string(),
            reason: "empty selector in list".to_string(),
        });
    }

    Ok(parts)
}

/// Attribute condition of a simple selector
#[derive(Clone, Debug, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

/// One simple selector understood by the tree backend:
/// `tag`, `*`, `[attr]`, `tag[attr]` or `tag[attr="value"]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleSelector {
    tag: Option<String>,
    attribute: Option<AttributeMatch>,
}

fn simple_selector_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^(?P<tag>\*|[A-Za-z][A-Za-z0-9-]*)?(?:\[\s*(?P<attr>[A-Za-z_:][A-Za-z0-9_:.-]*)\s*(?:=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[A-Za-z0-9_-]+))\s*)?\])?$"#,
        )
        .expect("simple selector pattern is valid")
    })
}

impl SimpleSelector {
    pub fn parse(selector: &str) -> Result<Self, ParserError> {
        let selector = selector.trim();
        let invalid = |reason: &str| ParserError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        };

        let captures = simple_selector_regex()
            .captures(selector)
            .ok_or_else(|| invalid("unsupported selector syntax"))?;

        let tag = captures.name("tag").map(|m| m.as_str());
        let attribute = captures.name("attr").map(|name| AttributeMatch {
            name: name.as_str().to_lowercase(),
            value: captures
                .name("dq")
                .or_else(|| captures.name("sq"))
                .or_else(|| captures.name("bare"))
                .map(|m| m.as_str().to_string()),
        });

        if tag.is_none() && attribute.is_none() {
            return Err(invalid("empty selector"));
        }

        Ok(SimpleSelector {
            tag: tag.filter(|t| *t != "*").map(|t| t.to_lowercase()),
            attribute,
        })
    }

    /// Tests an element described by its tag name and an attribute reader
    pub fn matches<F>(&self, tag_name: &str, attribute: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref tag) = self.tag {
            if !tag.eq_ignore_ascii_case(tag_name) {
                return false;
            }
        }

        match self.attribute {
            None => true,
            Some(ref condition) => match (attribute(&condition.name), &condition.value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_attrs(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn splits_on_top_level_commas() {
        assert_eq!(
            split_selector_list("a, button ,input").unwrap(),
            vec!["a", "button", "input"]
        );
        assert_eq!(
            split_selector_list(r#"meta[content="a,b"], img"#).unwrap(),
            vec![r#"meta[content="a,b"]"#, "img"]
        );
    }

    #[test]
    fn rejects_empty_entries() {
        assert!(split_selector_list("").is_err());
        assert!(split_selector_list("a,").is_err());
        assert!(split_selector_list(" , img").is_err());
    }

    #[test]
    fn bare_tags_ignore_case() {
        let selector = SimpleSelector::parse("IMG").unwrap();
        assert!(selector.matches("img", no_attrs));
        assert!(!selector.matches("input", no_attrs));
    }

    #[test]
    fn attribute_presence_and_value() {
        let presence = SimpleSelector::parse("[tabindex]").unwrap();
        assert!(presence.matches("div", |name| (name == "tabindex").then(|| "-1".to_string())));
        assert!(!presence.matches("div", no_attrs));

        let valued = SimpleSelector::parse(r#"meta[name="viewport"]"#).unwrap();
        assert!(valued.matches("meta", |_| Some("viewport".to_string())));
        assert!(!valued.matches("meta", |_| Some("robots".to_string())));
        assert!(!valued.matches("link", |_| Some("viewport".to_string())));

        let single = SimpleSelector::parse("meta[name='viewport']").unwrap();
        assert_eq!(single, valued);
    }

    #[test]
    fn universal_selector_matches_everything() {
        let selector = SimpleSelector::parse("*").unwrap();
        assert!(selector.matches("span", no_attrs));
    }

    #[test]
    fn unsupported_syntax_is_an_error() {
        for bad in ["div > p", "a:hover", ".class", "#id", "img[alt", "h1 h2"] {
            assert!(SimpleSelector::parse(bad).is_err(), "accepted {}", bad);
        }
    }
}
