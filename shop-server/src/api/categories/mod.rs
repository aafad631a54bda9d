//! Category API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use super::admin_only;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).merge(admin_only(post(handler::create))))
        .route(
            "/{id}",
            get(handler::get_by_id).merge(admin_only(put(handler::update).delete(handler::delete))),
        )
}
