//! Stats API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use super::admin_only;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stats", get(handler::get_stats))
        .route("/api/stats/featured", admin_only(put(handler::set_featured)))
}
