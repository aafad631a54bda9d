//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`extract`] - JSON 请求体提取器
//! - [`auth`] - 注册、登录、会话
//! - [`categories`] - 分类管理接口
//! - [`products`] - 商品管理接口
//! - [`feedback`] - 点赞与评论
//! - [`orders`] - 订单接口
//! - [`stats`] - 热销 / 新品 / 精选

pub mod auth;
pub mod extract;
pub mod health;

// Data models API
pub mod categories;
pub mod feedback;
pub mod orders;
pub mod products;
pub mod stats;

use axum::{middleware, routing::MethodRouter};

use crate::auth::require_admin;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Restrict a method router to administrators
pub(crate) fn admin_only(route: MethodRouter<ServerState>) -> MethodRouter<ServerState> {
    route.route_layer(middleware::from_fn(require_admin))
}
