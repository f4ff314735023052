//! HTML 文件上传检查 API

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Json,
};
use tokio::task;

use crate::core::{analyze_bytes, AnalysisResult};
use crate::web::types::{ApiError, ApiSuccess, AppState};

/// 上传字段名
pub const HTML_FILE_FIELD: &str = "html_file";

const ACCEPTED_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// 校验通过的上传文件
struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

/// 接收一个 HTML 文件并返回分析结果
pub async fn check_html(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiSuccess<AnalysisResult>>, (StatusCode, Json<serde_json::Value>)> {
    let upload = read_html_file(multipart, &state).await.map_err(ApiError::into_parts)?;

    tracing::info!(
        "检查上传文件: {} ({} bytes)",
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.data.len()
    );

    let analysis = {
        let state = state.clone();
        task::spawn_blocking(move || {
            analyze_bytes(&upload.data, None, &state.options, state.enhancer.as_deref())
        })
    };

    match analysis.await {
        Ok(Ok(result)) => Ok(Json(ApiSuccess::new(
            "File has been analyzed successfully.",
            result,
        ))),
        Ok(Err(e)) => {
            tracing::error!("分析失败 ({}): {}", e.kind(), e);
            Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_parts())
        }
        Err(e) => {
            tracing::error!("分析任务执行失败: {}", e);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("任务执行失败: {}", e),
            )
            .into_parts())
        }
    }
}

/// 读取并校验 `html_file` 字段：必填、HTML 类型、大小上限
async fn read_html_file(
    multipart: Result<Multipart, MultipartRejection>,
    state: &AppState,
) -> Result<Upload, ApiError> {
    let too_large = || {
        ApiError::validation(
            HTML_FILE_FIELD,
            format!(
                "The html file field must not be greater than {} kilobytes.",
                state.max_upload_kb()
            ),
        )
    };

    let mut multipart =
        multipart.map_err(|e| ApiError::validation(HTML_FILE_FIELD, e.body_text()))?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(ApiError::validation(HTML_FILE_FIELD, e.body_text())),
        };

        if field.name() != Some(HTML_FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large()
            } else {
                ApiError::validation(HTML_FILE_FIELD, e.body_text())
            }
        })?;

        if data.is_empty() {
            break;
        }

        if !is_html(file_name.as_deref(), content_type.as_deref()) {
            return Err(ApiError::validation(
                HTML_FILE_FIELD,
                "The html file field must be a file of type: html, htm.",
            ));
        }

        if data.len() > state.max_upload_bytes {
            return Err(too_large());
        }

        return Ok(Upload { file_name, data });
    }

    Err(ApiError::validation(
        HTML_FILE_FIELD,
        "The html file field is required.",
    ))
}

fn is_html(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| extension.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false);

    let by_content_type = content_type
        .map(|mime| {
            mime.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .eq_ignore_ascii_case("text/html")
        })
        .unwrap_or(false);

    by_extension || by_content_type
}
