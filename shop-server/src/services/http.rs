use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::{Result, ServerState};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::categories::router())
        .merge(crate::api::products::router())
        .merge(crate::api::feedback::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::stats::router())
}

/// Router with state and the full middleware stack
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // 认证中间件 - require_auth 内部跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// Serve `app` on `addr` until `shutdown_signal` resolves, then give
/// in-flight requests `grace` to finish.
pub async fn start_server<F>(
    app: Router,
    addr: SocketAddr,
    shutdown_signal: F,
    grace: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Shop server listening on {}", addr);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut task = tokio::spawn(serve.into_future());

    tokio::select! {
        finished = &mut task => {
            finished??;
            return Ok(());
        }
        _ = shutdown_signal => {}
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(grace, task).await {
        Ok(finished) => finished??,
        Err(_) => tracing::warn!(
            grace_ms = grace.as_millis() as u64,
            "Graceful shutdown timed out, dropping open connections"
        ),
    }
    tracing::info!("Server stopped");
    Ok(())
}
