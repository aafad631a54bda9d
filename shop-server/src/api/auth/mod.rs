//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/register, /api/login, /api/bootstrap-admin: public
/// - /api/logout, /api/profile: bearer token (checked by the global require_auth middleware)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
        .route("/api/bootstrap-admin", post(handler::bootstrap_admin))
        .route("/api/logout", post(handler::logout))
        .route("/api/profile", get(handler::profile))
}
