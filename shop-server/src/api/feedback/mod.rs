//! Feedback API 模块 - 点赞与评论
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /api/products/{id}/like | POST | bearer |
//! | /api/products/{id}/comment | POST | bearer |
//! | /api/products/{id}/comments | GET | 无 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/products/{id}/like", post(handler::toggle_like))
        .route("/api/products/{id}/comment", post(handler::add_comment))
        .route("/api/products/{id}/comments", get(handler::list_comments))
}
