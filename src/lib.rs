//! # WCAG Checker
//!
//! 对单个 HTML 文档做可访问性检查，给出 0-100 的得分和问题列表。
//!
//! ## 模块组织
//!
//! - `core` - 分析入口（解析 → 规则 → 评分 → 可选增强）
//! - `parsers` - 文档解析后端（宽松树解析 / CSS 查询引擎）
//! - `rules` - 五条可访问性规则
//! - `pipeline` - 规则顺序执行
//! - `scoring` - 得分计算
//! - `enhancer` - 外部文本生成服务改写建议
//! - `env` - 类型安全的环境变量配置
//! - `web` - HTTP 接口（可选）

pub mod core;
pub mod enhancer;
pub mod env;
pub mod error;
pub mod parsers;
pub mod pipeline;
pub mod rules;
pub mod scoring;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use crate::core::{analyze, analyze_bytes, analyze_with_options, AnalysisResult, AnalyzerOptions};
pub use enhancer::{EnhancerConfig, GeminiClient, TextGenerator};
pub use error::AnalysisError;
pub use parsers::{Document, ParserBackend};
pub use rules::{Issue, LabelPolicy, Severity};
