//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use crate::env::{EnvError, EnvResult, EnvVar};

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 上传文件大小上限（KB）
    pub max_upload_kb: usize,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::web;

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            max_upload_kb: web::MaxUploadKb::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "WCAG_WEB_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: "WCAG_WEB_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.max_upload_kb == 0 {
            return Err(EnvError {
                variable: "WCAG_MAX_UPLOAD_KB".to_string(),
                message: "Upload limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_kb * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WebConfig {
        WebConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_kb: 2048,
        }
    }

    #[test]
    fn listen_address_and_limit() {
        assert_eq!(config().listen_address(), "0.0.0.0:3000");
        assert_eq!(config().max_upload_bytes(), 2048 * 1024);
    }

    #[test]
    fn rejects_zero_port() {
        let mut config = config();
        config.port = 0;
        assert!(config.validate().is_err());
    }
}
