//! Images must carry an `alt` attribute. An empty `alt` marks a decorative
//! image and is accepted.

use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{Issue, Rule, Severity};

pub struct MissingAltRule;

impl Rule for MissingAltRule {
    fn name(&self) -> &'static str {
        "missing-alt"
    }

    fn check(&self, document: &dyn Document, mut issues: Vec<Issue>) -> Result<Vec<Issue>, AnalysisError> {
        let images = document
            .select("img")
            .map_err(|e| AnalysisError::in_rule(self.name(), e))?;

        for image in images {
            if document.attribute("alt", image).is_none() {
                issues.push(
                    Issue::new("img", "Missing alt attribute", Severity::High)
                        .with_suggestion("Provide a meaningful alt attribute for images."),
                );
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ParserBackend;

    fn check(html: &str) -> Vec<Issue> {
        let document = ParserBackend::Tree.parse(html).unwrap();
        MissingAltRule.check(document.as_ref(), Vec::new()).unwrap()
    }

    #[test]
    fn flags_image_without_alt() {
        let issues = check(r#"<img src="x.jpg">"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].element, "img");
        assert_eq!(issues[0].issue, "Missing alt attribute");
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn empty_alt_is_decorative() {
        assert!(check(r#"<img src="divider.png" alt="">"#).is_empty());
        assert!(check(r#"<img src="cat.png" alt="A cat">"#).is_empty());
    }

    #[test]
    fn keeps_earlier_issues_first() {
        let document = ParserBackend::Tree.parse(r#"<img src="a.png"><img src="b.png">"#).unwrap();
        let prior = vec![Issue::new("document", "earlier", Severity::Low)];
        let issues = MissingAltRule.check(document.as_ref(), prior).unwrap();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].issue, "earlier");
    }
}
