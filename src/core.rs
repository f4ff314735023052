//! 核心分析入口
//!
//! 一次分析：解析文档 → 按顺序运行规则 → 用原始问题计算得分 → 可选的建议增强。
//! 要么得到完整结果，要么得到唯一一个错误。

use serde::{Deserialize, Serialize};

use crate::enhancer::{enhance_issues, TextGenerator};
use crate::error::AnalysisError;
use crate::parsers::html::decode_html;
use crate::parsers::ParserBackend;
use crate::pipeline::run_rules;
use crate::rules::{default_rules, Issue, LabelPolicy, RuleOptions};
use crate::scoring::score;

/// Options controlling a single analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyzerOptions {
    pub parser: ParserBackend,
    pub label_policy: LabelPolicy,
}

/// Outcome of a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Rounded to two decimals, always within `[0, 100]`
    pub accessibility_score: f64,
    pub issues: Vec<Issue>,
}

/// Analyzes `html` with the given backend and no enhancement
pub fn analyze(html: &str, backend: ParserBackend) -> Result<AnalysisResult, AnalysisError> {
    let options = AnalyzerOptions {
        parser: backend,
        ..AnalyzerOptions::default()
    };
    analyze_with_options(html, &options, None)
}

/// Analyzes `html`; when `generator` is given the issue list is replaced by
/// the enhanced one, while the score keeps reflecting the raw findings.
pub fn analyze_with_options(
    html: &str,
    options: &AnalyzerOptions,
    generator: Option<&dyn TextGenerator>,
) -> Result<AnalysisResult, AnalysisError> {
    let document = options.parser.parse(html)?;

    let rules = default_rules(RuleOptions {
        label_policy: options.label_policy,
    });
    let issues = run_rules(&rules, document.as_ref())?;
    let accessibility_score = score(document.as_ref(), &issues)?;

    tracing::info!(
        "Analyzed document with {} parser: score {}, {} issue(s)",
        options.parser,
        accessibility_score,
        issues.len()
    );

    let issues = match generator {
        Some(generator) => enhance_issues(generator, &issues)?,
        None => issues,
    };

    Ok(AnalysisResult {
        accessibility_score,
        issues,
    })
}

/// Decodes raw bytes with the given charset label (UTF-8 when absent or
/// unknown) and analyzes the result
pub fn analyze_bytes(
    data: &[u8],
    encoding: Option<&str>,
    options: &AnalyzerOptions,
    generator: Option<&dyn TextGenerator>,
) -> Result<AnalysisResult, AnalysisError> {
    let html = decode_html(data, encoding);
    analyze_with_options(&html, options, generator)
}
