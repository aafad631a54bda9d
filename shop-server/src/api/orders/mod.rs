//! Order API Module
//!
//! Placement is open to any signed-in user. Status/address changes and
//! deletion are admin-only, stricter than a bearer token alone; they are
//! gated by [`OrderAccess`](crate::orders::OrderAccess) in the handlers.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
}
