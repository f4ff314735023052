//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理，每个变量一个类型

use std::env;
use std::fmt;
use std::time::Duration;

use crate::parsers::ParserBackend;
use crate::rules::LabelPolicy;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "WCAG_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid log level '{}'. Use: trace, debug, info, warn, error", value),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }

    /// 解析后端
    pub struct Parser;
    impl EnvVar<ParserBackend> for Parser {
        const NAME: &'static str = "WCAG_PARSER";
        const DEFAULT: Option<ParserBackend> = Some(ParserBackend::Tree);
        const DESCRIPTION: &'static str = "HTML parser backend: tree (lenient) or query (CSS engine)";

        fn parse(value: &str) -> EnvResult<ParserBackend> {
            value.parse().map_err(|message| EnvError {
                variable: Self::NAME.to_string(),
                message,
            })
        }
    }

    /// 表单标签判定策略
    pub struct Labels;
    impl EnvVar<LabelPolicy> for Labels {
        const NAME: &'static str = "WCAG_LABEL_POLICY";
        const DEFAULT: Option<LabelPolicy> = Some(LabelPolicy::EitherMissing);
        const DESCRIPTION: &'static str =
            "Form label policy: either (flag when aria-label or id is missing) or both";

        fn parse(value: &str) -> EnvResult<LabelPolicy> {
            value.parse().map_err(|message| EnvError {
                variable: Self::NAME.to_string(),
                message,
            })
        }
    }
}

/// 建议增强相关环境变量
pub mod enhancer {
    use super::*;

    /// 增强功能启用状态
    pub struct Enabled;
    impl EnvVar<bool> for Enabled {
        const NAME: &'static str = "WCAG_ENHANCER_ENABLED";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Rewrite issues through the text-generation service";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "WCAG_ENHANCER_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("https://generativelanguage.googleapis.com/v1beta".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Text-generation API base URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// API密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "WCAG_ENHANCER_API_KEY";
        const DEFAULT: Option<String> = None; // 无默认值，必须设置
        const DESCRIPTION: &'static str = "Text-generation API key";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.len() < 8 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key must be at least 8 characters".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    /// 模型名称
    pub struct Model;
    impl EnvVar<String> for Model {
        const NAME: &'static str = "WCAG_ENHANCER_MODEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("gemini-pro".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Model used for generateContent";

        fn parse(value: &str) -> EnvResult<String> {
            let model = value.trim();
            if model.is_empty() || model.contains('/') {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Model must be a bare model name".to_string(),
                });
            }
            Ok(model.to_string())
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "WCAG_ENHANCER_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Enhancement request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            if seconds > 300 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout too long (max 300 seconds)".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "WCAG_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "WCAG_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }

    /// 上传文件大小上限
    pub struct MaxUploadKb;
    impl EnvVar<usize> for MaxUploadKb {
        const NAME: &'static str = "WCAG_MAX_UPLOAD_KB";
        const DEFAULT: Option<usize> = Some(2048);
        const DESCRIPTION: &'static str = "Maximum size of an uploaded HTML file in kilobytes";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 65536)
        }
    }
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    // 核心配置
    pub log_level: String,
    pub no_color: bool,
    pub parser: ParserBackend,
    pub label_policy: LabelPolicy,

    // 增强配置
    pub enhancer_enabled: bool,
    pub enhancer_api_url: String,
    pub enhancer_api_key: Option<String>,
    pub enhancer_model: String,
    pub enhancer_timeout: Duration,

    // Web配置
    pub web_bind_address: String,
    pub web_port: u16,
    pub web_max_upload_kb: usize,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,
            parser: core::Parser::get()?,
            label_policy: core::Labels::get()?,

            enhancer_enabled: enhancer::Enabled::get()?,
            enhancer_api_url: enhancer::ApiUrl::get()?,
            enhancer_api_key: enhancer::ApiKey::get().ok(),
            enhancer_model: enhancer::Model::get()?,
            enhancer_timeout: enhancer::Timeout::get()?,

            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,
            web_max_upload_kb: web::MaxUploadKb::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.enhancer_enabled && self.enhancer_api_key.is_none() {
            return Err(EnvError {
                variable: enhancer::ApiKey::NAME.to_string(),
                message: format!(
                    "Required when {} is enabled",
                    enhancer::Enabled::NAME
                ),
            });
        }
        Ok(())
    }

    /// 打印配置摘要（隐藏敏感信息）
    pub fn log_summary(&self) {
        tracing::info!("Environment configuration:");
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Parser: {}", self.parser);
        tracing::info!("  Label policy: {}", self.label_policy);
        tracing::info!(
            "  Enhancer: {}",
            if self.enhancer_enabled { "enabled" } else { "disabled" }
        );
        tracing::info!("  Web server: {}:{}", self.web_bind_address, self.web_port);
        if self.enhancer_api_key.is_some() {
            tracing::info!("  API key: [configured]");
        }
    }
}

fn describe<V: EnvVar<T>, T: fmt::Debug>() -> String {
    format!("- `{}`: {} (default: {:?})\n", V::NAME, V::DESCRIPTION, V::DEFAULT)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&describe::<core::LogLevel, String>());
    docs.push_str(&describe::<core::NoColor, bool>());
    docs.push_str(&describe::<core::Parser, ParserBackend>());
    docs.push_str(&describe::<core::Labels, LabelPolicy>());

    docs.push_str("\n## Enhancer Configuration\n\n");
    docs.push_str(&describe::<enhancer::Enabled, bool>());
    docs.push_str(&describe::<enhancer::ApiUrl, String>());
    docs.push_str(&describe::<enhancer::ApiKey, String>());
    docs.push_str(&describe::<enhancer::Model, String>());
    docs.push_str(&describe::<enhancer::Timeout, Duration>());

    docs.push_str("\n## Web Server Configuration\n\n");
    docs.push_str(&describe::<web::BindAddress, String>());
    docs.push_str(&describe::<web::Port, u16>());
    docs.push_str(&describe::<web::MaxUploadKb, usize>());

    docs
}
