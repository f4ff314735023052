//! Sequential rule runner
//!
//! Rules run in list order against one shared document, each receiving the
//! issues accumulated so far. The first failing rule aborts the run.

use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{Issue, Rule};

pub fn run_rules(rules: &[Box<dyn Rule>], document: &dyn Document) -> Result<Vec<Issue>, AnalysisError> {
    let mut issues = Vec::new();

    for rule in rules {
        let before = issues.len();
        issues = rule.check(document, issues)?;
        tracing::debug!(
            "Rule {} found {} issue(s)",
            rule.name(),
            issues.len() - before
        );
    }

    Ok(issues)
}
