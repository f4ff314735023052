//! 宽松树解析后端
//!
//! - `dom`: html5ever + rcdom 基础操作
//!
//! 元素在构建时按文档顺序收集一次，之后只读。

pub mod dom;

use markup5ever_rcdom::Handle;

use crate::error::AnalysisError;
use crate::parsers::{split_selector_list, Document, ElementRef, ParserError, SimpleSelector};

pub use dom::{collect_elements, decode_html, get_node_attr, get_node_name, html_to_dom};

/// Document backed by an html5ever rcdom tree
pub struct TreeDocument {
    // Only names and attributes are read after collection; the tree itself is
    // dropped once the element handles are gathered.
    elements: Vec<Handle>,
}

impl TreeDocument {
    pub fn parse(html: &str) -> Result<Self, AnalysisError> {
        let dom = html_to_dom(html).map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let mut elements = Vec::new();
        collect_elements(&dom.document, &mut elements);

        Ok(TreeDocument { elements })
    }

    fn handle(&self, element: ElementRef) -> Option<&Handle> {
        self.elements.get(element.position())
    }
}

impl Document for TreeDocument {
    fn select(&self, pattern: &str) -> Result<Vec<ElementRef>, ParserError> {
        let mut found = Vec::new();

        for part in split_selector_list(pattern)? {
            let selector = SimpleSelector::parse(part)?;

            for (position, node) in self.elements.iter().enumerate() {
                let name = get_node_name(node).unwrap_or_default();
                if selector.matches(name, |attr| get_node_attr(node, attr)) {
                    found.push(ElementRef::new(position));
                }
            }
        }

        Ok(found)
    }

    fn attribute(&self, name: &str, element: ElementRef) -> Option<String> {
        self.handle(element)
            .and_then(|node| get_node_attr(node, &name.to_lowercase()))
    }

    fn tag_name(&self, element: ElementRef) -> String {
        self.handle(element)
            .and_then(get_node_name)
            .unwrap_or_default()
            .to_string()
    }

    fn all_elements(&self) -> Vec<ElementRef> {
        (0..self.elements.len()).map(ElementRef::new).collect()
    }
}
