//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 健康检查 (含数据文件可读性) | 无 |
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0", "products": 12, "orders": 3 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    products: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orders: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// 基础健康检查：数据文件读取失败时返回 degraded
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let version = env!("CARGO_PKG_VERSION");
    match state.db.read().await {
        Ok(snapshot) => Json(HealthResponse {
            status: "healthy",
            version,
            products: Some(snapshot.catalogue.len()),
            orders: Some(snapshot.orders.len()),
            message: None,
        }),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed to read the document");
            Json(HealthResponse {
                status: "degraded",
                version,
                products: None,
                orders: None,
                message: Some(e.to_string()),
            })
        }
    }
}
