//! 增强服务配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use std::time::Duration;

use crate::env::{EnvError, EnvResult, EnvVar};

/// 外部文本生成服务配置
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// API 基础地址，例如 `https://generativelanguage.googleapis.com/v1beta`
    pub api_url: String,
    /// API 密钥
    pub api_key: String,
    /// 模型名称
    pub model: String,
    /// 单次请求超时
    pub timeout: Duration,
}

impl EnhancerConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::enhancer;

        let config = Self {
            api_url: enhancer::ApiUrl::get()?,
            api_key: enhancer::ApiKey::get()?,
            model: enhancer::Model::get()?,
            timeout: enhancer::Timeout::get()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.model.trim().is_empty() {
            return Err(EnvError {
                variable: "WCAG_ENHANCER_MODEL".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        if self.timeout.is_zero() {
            return Err(EnvError {
                variable: "WCAG_ENHANCER_TIMEOUT".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// `generateContent` 端点地址
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnhancerConfig {
        EnhancerConfig {
            api_url: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            api_key: "test-key-123".to_string(),
            model: "gemini-pro".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn endpoint_joins_url_and_model() {
        assert_eq!(
            config().endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = config();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
