//! Web 模块的数据类型定义

use std::sync::Arc;

use axum::{http::StatusCode, response::Json};
use serde::Serialize;

use crate::core::AnalyzerOptions;
use crate::enhancer::TextGenerator;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub options: AnalyzerOptions,
    /// 配置后每次分析都会调用增强服务
    pub enhancer: Option<Arc<dyn TextGenerator>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn max_upload_kb(&self) -> usize {
        self.max_upload_bytes / 1024
    }
}

/// 成功响应
#[derive(Serialize)]
pub struct ApiSuccess<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// 错误响应
#[derive(Serialize)]
pub struct ApiError {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            status_code: status.as_u16(),
        }
    }

    /// 单个字段的校验失败（422）
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            errors: Some(serde_json::json!({ field: [message.clone()] })),
            message,
            status_code: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
        }
    }

    /// 转换为处理器的错误返回值
    pub fn into_parts(self) -> (StatusCode, Json<serde_json::Value>) {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(&self).unwrap_or_else(|_| {
            serde_json::json!({
                "success": false,
                "message": self.message,
                "statusCode": self.status_code,
            })
        });
        (status, Json(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_keyed_by_field() {
        let (status, Json(body)) =
            ApiError::validation("html_file", "The html file field is required.").into_parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 422);
        assert_eq!(body["errors"]["html_file"][0], "The html file field is required.");
    }

    #[test]
    fn plain_errors_omit_the_errors_key() {
        let (status, Json(body)) =
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "boom").into_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("errors").is_none());
        assert_eq!(body["message"], "boom");
    }
}
