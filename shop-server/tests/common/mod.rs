//! Shared helpers for router-level tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use shop_server::auth::JwtConfig;
use shop_server::db::Snapshot;
use shop_server::services::build_router;
use shop_server::{Config, Database, ServerState};
use shared::models::{Category, Product};
use tower::ServiceExt;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        issuer: "shop-server".to_string(),
        audience: "shop-clients".to_string(),
    }
}

pub fn product(id: u64, price: Decimal, stock: u32) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        description: String::new(),
        price,
        stock,
        category_id: 1,
        likes: 0,
        views: 0,
        created_at: id as i64,
        images: vec![],
    }
}

/// Category 1 with product 1 (price 10, stock 5) and product 2 (price 20, stock 1)
pub fn catalog() -> Snapshot {
    let mut snap = Snapshot::default();
    snap.categories.push(Category {
        id: 1,
        name: "Home".to_string(),
        slug: "home".to_string(),
    });
    snap.catalogue = vec![
        product(1, Decimal::new(10, 0), 5),
        product(2, Decimal::new(20, 0), 1),
    ];
    snap
}

pub fn state_with(snapshot: Snapshot) -> ServerState {
    let config = Config::with_overrides(std::env::temp_dir(), 0, jwt_config());
    ServerState::new(config, Database::in_memory(snapshot))
}

pub fn app(state: &ServerState) -> Router {
    build_router(state.clone())
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Bootstrap the admin account and return its token
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/bootstrap-admin", None, None).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_string()
}

/// Register a regular user and return its token
pub async fn user_token(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/register",
        None,
        Some(serde_json::json!({
            "firstname": "Grace",
            "lastname": "Hopper",
            "email": email,
            "password": "s3cret-pass",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["token"].as_str().unwrap().to_string()
}
