//! Form controls (`input`, `select`, `textarea`) need an accessible label.
//!
//! Only `aria-label` and `id` are inspected; a `<label for>` pointing at the
//! control is not resolved.

use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;
use crate::parsers::Document;
use crate::rules::{is_blank, Issue, Rule, Severity};

/// Which missing attributes make a control unlabelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Flag when `aria-label` or `id` is absent or empty
    #[default]
    EitherMissing,
    /// Flag only when both `aria-label` and `id` are absent or empty
    BothMissing,
}

impl LabelPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelPolicy::EitherMissing => "either",
            LabelPolicy::BothMissing => "both",
        }
    }

    fn is_unlabelled(&self, aria_label_missing: bool, id_missing: bool) -> bool {
        match self {
            LabelPolicy::EitherMissing => aria_label_missing || id_missing,
            LabelPolicy::BothMissing => aria_label_missing && id_missing,
        }
    }
}

impl fmt::Display for LabelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "either" | "either-missing" => Ok(LabelPolicy::EitherMissing),
            "both" | "both-missing" => Ok(LabelPolicy::BothMissing),
            other => Err(format!("Unknown label policy '{}'. Use: either, both", other)),
        }
    }
}

pub struct MissingLabelRule {
    policy: LabelPolicy,
}

impl MissingLabelRule {
    pub fn new(policy: LabelPolicy) -> Self {
        MissingLabelRule { policy }
    }
}

impl Rule for MissingLabelRule {
    fn name(&self) -> &'static str {
        "missing-label"
    }

    fn check(&self, document: &dyn Document, mut issues: Vec<Issue>) -> Result<Vec<Issue>, AnalysisError> {
        let controls = document
            .select("input, select, textarea")
            .map_err(|e| AnalysisError::in_rule(self.name(), e))?;

        for control in controls {
            let aria_label_missing = is_blank(document.attribute("aria-label", control));
            let id_missing = is_blank(document.attribute("id", control));

            if self.policy.is_unlabelled(aria_label_missing, id_missing) {
                issues.push(
                    Issue::new(document.tag_name(control), "Missing accessible label", Severity::High)
                        .with_suggestion("Provide an aria-label or associate input with a <label>."),
                );
            }
        }

        Ok(issues)
    }
}
