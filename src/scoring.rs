//! Accessibility score
//!
//! The score starts from a base that depends on how much accessibility-relevant
//! content the page has, loses a fixed weight per issue, and is clamped to
//! `[0, 100]` after rounding to two decimals. Pages with fewer than five
//! elements take half again the issue impact, and if they also have no
//! essential elements they can never score above 40.

use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{Issue, Severity};

/// Selectors counted as essential content; an element is counted once per
/// selector it matches
pub const ESSENTIAL_ELEMENTS: [&str; 7] = [
    "img",
    "a",
    "input",
    "button",
    "h1, h2, h3, h4, h5, h6",
    "form",
    "table",
];

const MINIMAL_PAGE_ELEMENTS: usize = 5;
const MINIMAL_PAGE_IMPACT_FACTOR: f64 = 1.5;
const EMPTY_PAGE_SCORE_CAP: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCounts {
    pub total: usize,
    pub essential: usize,
}

impl ElementCounts {
    pub fn from_document(document: &dyn Document) -> Result<Self, AnalysisError> {
        let mut essential = 0;
        for selector in ESSENTIAL_ELEMENTS {
            essential += document
                .select(selector)
                .map_err(|e| AnalysisError::in_rule("scoring", e))?
                .len();
        }

        Ok(ElementCounts {
            total: document.all_elements().len(),
            essential,
        })
    }

    fn is_minimal(&self) -> bool {
        self.total < MINIMAL_PAGE_ELEMENTS
    }
}

pub fn base_score(counts: &ElementCounts) -> f64 {
    match counts.essential {
        0 => 40.0,
        1..=2 => 50.0,
        3..=4 => 60.0,
        _ => 100.0,
    }
}

pub fn issue_impact(issues: &[Issue], counts: &ElementCounts) -> f64 {
    let impact: u32 = Severity::ALL
        .iter()
        .map(|severity| {
            let count = issues.iter().filter(|issue| issue.severity == *severity).count() as u32;
            count * severity.weight()
        })
        .sum();

    let impact = f64::from(impact);
    if counts.is_minimal() && !issues.is_empty() {
        impact * MINIMAL_PAGE_IMPACT_FACTOR
    } else {
        impact
    }
}

/// Final score for a set of element counts and issues
pub fn score_counts(counts: &ElementCounts, issues: &[Issue]) -> f64 {
    let mut score = base_score(counts) - issue_impact(issues, counts);

    if counts.is_minimal() && counts.essential == 0 {
        score = score.min(EMPTY_PAGE_SCORE_CAP);
    }

    round_to_cents(score).clamp(0.0, 100.0)
}

pub fn score(document: &dyn Document, issues: &[Issue]) -> Result<f64, AnalysisError> {
    let counts = ElementCounts::from_document(document)?;
    let score = score_counts(&counts, issues);
    tracing::debug!(
        "Scored {} issue(s) over {} element(s) ({} essential): {}",
        issues.len(),
        counts.total,
        counts.essential,
        score
    );
    Ok(score)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ParserBackend;

    fn counts(total: usize, essential: usize) -> ElementCounts {
        ElementCounts { total, essential }
    }

    fn high(n: usize) -> Vec<Issue> {
        (0..n).map(|_| Issue::new("a", "Tabindex issue", Severity::High)).collect()
    }

    #[test]
    fn base_score_thresholds() {
        assert_eq!(base_score(&counts(10, 0)), 40.0);
        assert_eq!(base_score(&counts(10, 2)), 50.0);
        assert_eq!(base_score(&counts(10, 4)), 60.0);
        assert_eq!(base_score(&counts(10, 5)), 100.0);
    }

    #[test]
    fn impact_is_weighted_by_severity() {
        let issues = vec![
            Issue::new("img", "x", Severity::High),
            Issue::new("meta", "x", Severity::Medium),
            Issue::new("p", "x", Severity::Low),
        ];
        assert_eq!(issue_impact(&issues, &counts(10, 5)), 35.0);
        assert_eq!(issue_impact(&issues, &counts(4, 5)), 52.5);
        assert_eq!(issue_impact(&[], &counts(1, 0)), 0.0);
    }

    #[test]
    fn minimal_pages_without_essentials_are_capped() {
        assert_eq!(score_counts(&counts(3, 0), &[]), 40.0);
        assert!(score_counts(&counts(4, 0), &high(1)) <= 40.0);
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(score_counts(&counts(20, 10), &high(30)), 0.0);
        assert_eq!(score_counts(&counts(20, 10), &[]), 100.0);
    }

    #[test]
    fn counts_each_essential_selector() {
        let document = ParserBackend::Tree
            .parse("<form><input><button>b</button></form><h1>t</h1><h2>s</h2><table></table>")
            .unwrap();
        let counts = ElementCounts::from_document(document.as_ref()).unwrap();
        // html, head, body, form, input, button, h1, h2, table
        assert_eq!(counts, ElementCounts { total: 9, essential: 6 });
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to_cents(12.345_6), 12.35);
        assert_eq!(round_to_cents(-0.004), -0.0);
    }
}
