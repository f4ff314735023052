//! # 建议增强
//!
//! 把规则产出的原始问题交给外部文本生成服务改写，得到更具体的描述和修复建议。
//!
//! - `TextGenerator`: 外部服务的最小契约（输入提示词，输出文本）
//! - `gemini`: 基于 reqwest 的 Gemini `generateContent` 客户端
//! - `config`: 增强服务配置
//!
//! 本地逻辑只负责构造提示词、校验返回结果并替换问题列表。任何失败都会让整次分析失败。

pub mod config;
pub mod gemini;

use crate::error::AnalysisError;
use crate::rules::Issue;

pub use config::EnhancerConfig;
pub use gemini::GeminiClient;

/// 外部文本生成服务
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, AnalysisError> + Send + Sync,
{
    fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        self(prompt)
    }
}

const INSTRUCTION: &str = "You are an AI assistant specializing in web accessibility. \
Given the following accessibility issues in an HTML document: {issues}, improve the issue \
descriptions and suggestions to be clearer and more actionable. Ensure that the output remains \
an array of updated issues in JSON format, with the same fields (element, issue, suggestion, \
severity) and severities limited to low, medium or high, without any additional explanations \
or formatting.";

/// 构造发送给外部服务的提示词
pub fn build_prompt(issues: &[Issue]) -> Result<String, AnalysisError> {
    let serialized = serde_json::to_string(issues)
        .map_err(|e| AnalysisError::EnhancementService(format!("cannot serialize issues: {}", e)))?;
    Ok(INSTRUCTION.replace("{issues}", &serialized))
}

/// 去掉模型常见的 Markdown 代码围栏
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // 跳过围栏后的语言标记，例如 ```json
    match body.find('\n') {
        Some(newline) if body[..newline].chars().all(|c| c.is_ascii_alphanumeric()) => {
            body[newline + 1..].trim()
        }
        _ => body.trim(),
    }
}

/// 解析并校验外部服务返回的问题数组
pub fn parse_enhanced_issues(text: &str) -> Result<Vec<Issue>, AnalysisError> {
    let payload = strip_code_fence(text);

    let value: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
        AnalysisError::EnhancementService(format!("response is not valid JSON: {}", e))
    })?;

    if !value.is_array() {
        return Err(AnalysisError::EnhancementService(
            "response is not a JSON array of issues".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        AnalysisError::EnhancementService(format!("response does not match the issue schema: {}", e))
    })
}

/// 调用外部服务改写问题列表，返回替换后的列表
pub fn enhance_issues(generator: &dyn TextGenerator, issues: &[Issue]) -> Result<Vec<Issue>, AnalysisError> {
    let prompt = build_prompt(issues)?;

    let enhanced = generator
        .generate(&prompt)
        .and_then(|text| parse_enhanced_issues(&text))
        .map_err(|e| {
            tracing::error!("Error fetching AI suggestions: {}", e);
            match e {
                AnalysisError::EnhancementService(_) => e,
                other => AnalysisError::EnhancementService(other.to_string()),
            }
        })?;

    tracing::info!(
        "增强服务返回 {} 个问题（原始 {} 个）",
        enhanced.len(),
        issues.len()
    );
    Ok(enhanced)
}
