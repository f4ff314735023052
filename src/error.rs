//! Error types for the analysis pipeline
//!
//! An analysis either fully succeeds or fails with exactly one `AnalysisError`.

use thiserror::Error;

use crate::parsers::ParserError;

/// Errors that abort an analysis run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input could not be read into a queryable document
    #[error("failed to parse HTML document: {0}")]
    Parse(String),

    /// An invariant inside a rule was violated
    #[error("rule `{rule}` failed: {message}")]
    RuleExecution { rule: &'static str, message: String },

    /// The external enhancement service failed or returned unusable data
    #[error("suggestion enhancement failed: {0}")]
    EnhancementService(String),
}

impl AnalysisError {
    /// Wraps a backend error raised while `rule` was running
    pub fn in_rule(rule: &'static str, error: ParserError) -> Self {
        AnalysisError::RuleExecution {
            rule,
            message: error.to_string(),
        }
    }

    /// Stable name of the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Parse(_) => "parse_error",
            AnalysisError::RuleExecution { .. } => "rule_execution_error",
            AnalysisError::EnhancementService(_) => "enhancement_service_error",
        }
    }
}
