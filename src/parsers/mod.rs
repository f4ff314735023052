//! # Parser adapters
//!
//! Every rule and the scorer talk to a parsed page through the [`Document`]
//! capability trait only. Two backends implement it:
//!
//! - `html` - lenient tree parser (html5ever + rcdom) with a small built-in
//!   selector matcher
//! - `query` - CSS query engine (scraper) accepting any selector it can parse
//!
//! Backends are picked at runtime through [`ParserBackend`].

pub mod html;
pub mod query;
pub mod selector;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::AnalysisError;

pub use html::TreeDocument;
pub use query::QueryDocument;
pub use selector::{split_selector_list, SimpleSelector};

/// Errors raised by a document backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Opaque handle to one element of a [`Document`]
///
/// Handles compare by document position, so sorting a selection restores
/// document order regardless of the backend that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementRef(usize);

impl ElementRef {
    pub(crate) fn new(position: usize) -> Self {
        ElementRef(position)
    }

    pub(crate) fn position(self) -> usize {
        self.0
    }
}

/// Read-only query interface over a parsed HTML page
pub trait Document {
    /// Selects elements matching a comma-separated selector list.
    ///
    /// Each sub-selector is evaluated on its own in document order and the
    /// results are concatenated; an element matched by two sub-selectors
    /// appears twice.
    fn select(&self, pattern: &str) -> Result<Vec<ElementRef>, ParserError>;

    /// Reads an attribute; `None` when absent, `Some("")` when present but empty
    fn attribute(&self, name: &str, element: ElementRef) -> Option<String>;

    /// Lower-case tag name of the element
    fn tag_name(&self, element: ElementRef) -> String;

    /// Every element of the page in document order
    fn all_elements(&self) -> Vec<ElementRef>;
}

/// Available document backends
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParserBackend {
    /// Lenient html5ever tree with the built-in selector matcher
    #[default]
    Tree,
    /// scraper CSS query engine
    Query,
}

impl ParserBackend {
    /// Builds a document for `html` using this backend
    pub fn parse(&self, html: &str) -> Result<Box<dyn Document>, AnalysisError> {
        match self {
            ParserBackend::Tree => Ok(Box::new(TreeDocument::parse(html)?)),
            ParserBackend::Query => Ok(Box::new(QueryDocument::parse(html))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParserBackend::Tree => "tree",
            ParserBackend::Query => "query",
        }
    }
}

impl fmt::Display for ParserBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "tree" | "lenient" | "custom" => Ok(ParserBackend::Tree),
            "query" | "strict" | "symfony" => Ok(ParserBackend::Query),
            other => Err(format!(
                "Unknown parser backend '{}'. Use: tree, query",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
        <html>
            <head><meta name="viewport" content="width=device-width"></head>
            <body>
                <a href="/one" tabindex="0">One</a>
                <img src="a.png" alt="">
                <button>Go</button>
                <img src="b.png">
            </body>
        </html>"#;

    fn backends() -> Vec<Box<dyn Document>> {
        vec![
            ParserBackend::Tree.parse(PAGE).unwrap(),
            ParserBackend::Query.parse(PAGE).unwrap(),
        ]
    }

    #[test]
    fn backend_names_round_trip() {
        assert_eq!("tree".parse::<ParserBackend>(), Ok(ParserBackend::Tree));
        assert_eq!("Symfony".parse::<ParserBackend>(), Ok(ParserBackend::Query));
        assert_eq!("custom".parse::<ParserBackend>(), Ok(ParserBackend::Tree));
        assert!("dom".parse::<ParserBackend>().is_err());
        assert_eq!(ParserBackend::default().to_string(), "tree");
    }

    #[test]
    fn backends_enumerate_the_same_elements() {
        for document in backends() {
            let names: Vec<String> = document
                .all_elements()
                .into_iter()
                .map(|el| document.tag_name(el))
                .collect();
            assert_eq!(
                names,
                vec!["html", "head", "meta", "body", "a", "img", "button", "img"]
            );
        }
    }

    #[test]
    fn absent_and_empty_attributes_differ() {
        for document in backends() {
            let images = document.select("img").unwrap();
            assert_eq!(images.len(), 2);
            assert_eq!(document.attribute("alt", images[0]), Some(String::new()));
            assert_eq!(document.attribute("alt", images[1]), None);
        }
    }

    #[test]
    fn selector_lists_concatenate_without_dedup() {
        for document in backends() {
            let found = document.select("a, button, [tabindex]").unwrap();
            let names: Vec<String> = found.iter().map(|el| document.tag_name(*el)).collect();
            assert_eq!(names, vec!["a", "button", "a"]);
            assert_eq!(found[0], found[2]);
        }
    }

    #[test]
    fn attribute_value_selectors() {
        for document in backends() {
            assert_eq!(document.select(r#"meta[name="viewport"]"#).unwrap().len(), 1);
            assert!(document.select(r#"meta[name="robots"]"#).unwrap().is_empty());
        }
    }

    #[test]
    fn empty_selectors_are_rejected() {
        for document in backends() {
            assert!(document.select("").is_err());
            assert!(document.select("a,,img").is_err());
        }
    }
}
