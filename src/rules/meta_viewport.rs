use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{Issue, Rule, Severity};

pub struct MetaViewportRule;

impl Rule for MetaViewportRule {
    fn name(&self) -> &'static str {
        "meta-viewport"
    }

    fn check(&self, document: &dyn Document, mut issues: Vec<Issue>) -> Result<Vec<Issue>, AnalysisError> {
        let viewport = document
            .select(r#"meta[name="viewport"]"#)
            .map_err(|e| AnalysisError::in_rule(self.name(), e))?;

        if viewport.is_empty() {
            issues.push(
                Issue::new("meta", "Missing viewport meta tag", Severity::Medium)
                    .with_suggestion("Ensure the document has a viewport meta tag for responsive design."),
            );
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ParserBackend;

    fn check(html: &str) -> Vec<Issue> {
        let document = ParserBackend::Query.parse(html).unwrap();
        MetaViewportRule.check(document.as_ref(), Vec::new()).unwrap()
    }

    #[test]
    fn missing_viewport_is_one_medium_issue() {
        let issues = check("<!DOCTYPE html><html><head></head><body></body></html>");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].element, "meta");
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn present_viewport_passes() {
        assert!(check(r#"<head><meta name="viewport" content="width=device-width"></head>"#).is_empty());
    }

    #[test]
    fn other_meta_tags_do_not_count() {
        assert_eq!(check(r#"<head><meta name="description" content="x"></head>"#).len(), 1);
    }
}
