//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::client::MessageResponse;
use shared::models::{Product, ProductCreate, ProductQuery, ProductUpdate, ProductsByCategory};
use shared::util::now_secs;

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::db::repository::product::not_found;
use crate::utils::AppResult;

/// GET /api/products - 商品列表 (?category_id=&q=&sort=)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_all(&query).await?))
}

/// GET /api/products/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// GET /api/products/category/{category_id} - 按分类获取商品
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<u64>,
) -> AppResult<Json<ProductsByCategory>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_by_category(category_id).await?))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload, now_secs()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id} - 部分更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    AppJson(payload): AppJson<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.update(id, payload).await?))
}

/// DELETE /api/products/{id} - 删除商品及其评论、点赞和统计引用
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<MessageResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
