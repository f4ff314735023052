//! CSS query-engine backend built on `scraper`
//!
//! Sub-selectors are handed to `scraper::Selector` as-is, so anything the
//! `selectors` crate understands works here, and anything it rejects is an
//! `InvalidSelector` error.

use scraper::{Html, Selector};

use crate::parsers::{split_selector_list, Document, ElementRef, ParserError};

/// Snapshot of one element taken when the document is built
struct ElementData {
    name: String,
    attrs: Vec<(String, String)>,
}

/// Document backed by a `scraper::Html` tree
pub struct QueryDocument {
    html: Html,
    elements: Vec<ElementData>,
}

impl QueryDocument {
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);

        let elements = html
            .tree
            .root()
            .descendants()
            .filter_map(scraper::ElementRef::wrap)
            .map(|element| ElementData {
                name: element.value().name().to_string(),
                attrs: element
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
            })
            .collect();

        QueryDocument { html, elements }
    }
}

impl Document for QueryDocument {
    fn select(&self, pattern: &str) -> Result<Vec<ElementRef>, ParserError> {
        let mut found = Vec::new();

        for part in split_selector_list(pattern)? {
            let selector = Selector::parse(part).map_err(|e| ParserError::InvalidSelector {
                selector: part.to_string(),
                reason: e.to_string(),
            })?;

            // Same traversal as in `parse`, so positions line up with `elements`.
            let matches = self
                .html
                .tree
                .root()
                .descendants()
                .filter_map(scraper::ElementRef::wrap)
                .enumerate()
                .filter(|(_, element)| selector.matches(element))
                .map(|(position, _)| ElementRef::new(position));
            found.extend(matches);
        }

        Ok(found)
    }

    fn attribute(&self, name: &str, element: ElementRef) -> Option<String> {
        let name = name.to_lowercase();
        self.elements
            .get(element.position())?
            .attrs
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.clone())
    }

    fn tag_name(&self, element: ElementRef) -> String {
        self.elements
            .get(element.position())
            .map(|data| data.name.clone())
            .unwrap_or_default()
    }

    fn all_elements(&self) -> Vec<ElementRef> {
        (0..self.elements.len()).map(ElementRef::new).collect()
    }
}
