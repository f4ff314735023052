//! # Accessibility rules
//!
//! Five independent checks, always run in this order:
//!
//! - `missing_alt` - images without an `alt` attribute
//! - `missing_label` - form controls without an accessible label
//! - `heading_hierarchy` - forward jumps of more than one heading level
//! - `meta_viewport` - missing `<meta name="viewport">`
//! - `keyboard_navigation` - anchors without `href` and tabindex problems
//!
//! Each rule receives the issues gathered so far and returns them with its own
//! findings appended. Rules never inspect earlier issues.

pub mod heading_hierarchy;
pub mod keyboard_navigation;
pub mod meta_viewport;
pub mod missing_alt;
pub mod missing_label;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::parsers::Document;

pub use heading_hierarchy::HeadingHierarchyRule;
pub use keyboard_navigation::KeyboardNavigationRule;
pub use meta_viewport::MetaViewportRule;
pub use missing_alt::MissingAltRule;
pub use missing_label::{LabelPolicy, MissingLabelRule};

/// How serious an issue is; each level carries a fixed score penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Points subtracted from the score per issue of this severity
    pub const fn weight(self) -> u32 {
        match self {
            Severity::Low => 5,
            Severity::Medium => 10,
            Severity::High => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected accessibility problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Tag name of the offending element, or a logical label such as `document`
    pub element: String,
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub severity: Severity,
}

impl Issue {
    pub fn new(element: impl Into<String>, issue: impl Into<String>, severity: Severity) -> Self {
        Issue {
            element: element.into(),
            issue: issue.into(),
            suggestion: None,
            severity,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A check over a parsed document
pub trait Rule {
    /// Short kebab-case name used in logs and errors
    fn name(&self) -> &'static str;

    /// Appends this rule's findings to `issues`
    fn check(&self, document: &dyn Document, issues: Vec<Issue>) -> Result<Vec<Issue>, AnalysisError>;
}

/// Rule configuration knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleOptions {
    pub label_policy: LabelPolicy,
}

/// The five rules in their fixed order
pub fn default_rules(options: RuleOptions) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(MissingAltRule),
        Box::new(MissingLabelRule::new(options.label_policy)),
        Box::new(HeadingHierarchyRule),
        Box::new(MetaViewportRule),
        Box::new(KeyboardNavigationRule),
    ]
}

/// Treats an absent attribute and an empty one alike
pub(crate) fn is_blank(value: Option<String>) -> bool {
    value.map_or(true, |v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_fixed() {
        assert_eq!(Severity::High.weight(), 20);
        assert_eq!(Severity::Medium.weight(), 10);
        assert_eq!(Severity::Low.weight(), 5);
    }

    #[test]
    fn issues_serialize_with_lowercase_severity() {
        let issue = Issue::new("img", "Missing alt attribute", Severity::High);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "element": "img",
                "issue": "Missing alt attribute",
                "severity": "high"
            })
        );
    }

    #[test]
    fn unknown_severity_does_not_deserialize() {
        let parsed: Result<Issue, _> = serde_json::from_str(
            r#"{"element":"img","issue":"x","severity":"critical"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn default_rule_order() {
        let names: Vec<&str> = default_rules(RuleOptions::default())
            .iter()
            .map(|rule| rule.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "missing-alt",
                "missing-label",
                "heading-hierarchy",
                "meta-viewport",
                "keyboard-navigation"
            ]
        );
    }
}
