//! Headings may only step one level deeper at a time (`h1` → `h3` is a skip).
//! Going back up any number of levels is fine.

use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{Issue, Rule, Severity};

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

pub struct HeadingHierarchyRule;

impl Rule for HeadingHierarchyRule {
    fn name(&self) -> &'static str {
        "heading-hierarchy"
    }

    fn check(&self, document: &dyn Document, mut issues: Vec<Issue>) -> Result<Vec<Issue>, AnalysisError> {
        let mut headings = document
            .select(HEADINGS)
            .map_err(|e| AnalysisError::in_rule(self.name(), e))?;
        // The selector list yields all h1s, then all h2s, ...
        headings.sort();
        headings.dedup();

        let mut last_level = 0;

        for heading in headings {
            let tag_name = document.tag_name(heading);
            let level = heading_level(&tag_name).ok_or_else(|| AnalysisError::RuleExecution {
                rule: self.name(),
                message: format!("cannot read heading level from <{}>", tag_name),
            })?;

            if last_level != 0 && level > last_level + 1 {
                issues.push(
                    Issue::new(tag_name, "Skipped heading level", Severity::High)
                        .with_suggestion("Use a proper heading hierarchy."),
                );
            }

            last_level = level;
        }

        Ok(issues)
    }
}

fn heading_level(tag_name: &str) -> Option<u32> {
    tag_name
        .strip_prefix('h')
        .and_then(|digits| digits.parse().ok())
        .filter(|level| (1..=6).contains(level))
}
