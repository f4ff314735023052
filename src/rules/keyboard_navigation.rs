//! Keyboard reachability heuristics.
//!
//! The tabindex check fires for every candidate whose `tabindex` is `-1` or
//! absent, which includes anchors and buttons that are focusable by default.
//! That condition is kept literally so scores stay comparable with earlier
//! reports.

use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{is_blank, Issue, Rule, Severity};

const FOCUSABLE: &str = "a, button, input, textarea, select, [tabindex]";

pub struct KeyboardNavigationRule;

impl Rule for KeyboardNavigationRule {
    fn name(&self) -> &'static str {
        "keyboard-navigation"
    }

    fn check(&self, document: &dyn Document, mut issues: Vec<Issue>) -> Result<Vec<Issue>, AnalysisError> {
        let candidates = document
            .select(FOCUSABLE)
            .map_err(|e| AnalysisError::in_rule(self.name(), e))?;

        if candidates.is_empty() {
            issues.push(
                Issue::new("document", "Keyboard navigation issue", Severity::High).with_suggestion(
                    "No interactive elements detected. Ensure users can navigate via keyboard.",
                ),
            );
            return Ok(issues);
        }

        for candidate in candidates {
            let tag_name = document.tag_name(candidate);

            if tag_name == "a" && is_blank(document.attribute("href", candidate)) {
                issues.push(
                    Issue::new("a", "Anchor tag missing href", Severity::High).with_suggestion(
                        "Ensure anchor tags (`<a>`) have an `href` attribute to be keyboard-accessible.",
                    ),
                );
            }

            let tabindex = document.attribute("tabindex", candidate);
            if tabindex.as_deref().map_or(true, |value| value == "-1") {
                let suggestion = format!(
                    "Element <{}> is missing tabindex or has tabindex=\"-1\"; give it a non-negative tabindex so it is reachable via keyboard.",
                    tag_name
                );
                issues.push(Issue::new(tag_name, "Tabindex issue", Severity::High).with_suggestion(suggestion));
            }
        }

        Ok(issues)
    }
}
