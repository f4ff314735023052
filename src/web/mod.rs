//! Web 服务器模块
//!
//! 通过 HTTP 上传 HTML 文件进行可访问性检查

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::io;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::CorsLayer;

use crate::core::AnalyzerOptions;
use crate::enhancer::TextGenerator;

/// multipart 边界和表单头部的余量
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(
        config: WebConfig,
        options: AnalyzerOptions,
        enhancer: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let state = Arc::new(AppState {
            options,
            enhancer,
            max_upload_bytes: config.max_upload_bytes(),
        });
        Self { config, state }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> io::Result<()> {
        let app = create_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.config.listen_address()).await?;

        tracing::info!(
            "Web server starting at http://{}",
            self.config.listen_address()
        );
        tracing::info!(
            "Parser: {}, label policy: {}, enhancer: {}",
            self.state.options.parser,
            self.state.options.label_policy,
            if self.state.enhancer.is_some() { "enabled" } else { "disabled" }
        );

        axum::serve(listener, app).await
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // 超出上限的文件应由校验规则返回 422，而不是传输层的 413
    let body_limit = app_state.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    create_routes()
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
}
