//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::MessageResponse;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::repository::CategoryRepository;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/categories - 获取所有分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/categories/{id} - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.find_by_id(id).await?.ok_or_else(|| {
        AppError::new(ErrorCode::CategoryNotFound).with_detail("category_id", id)
    })?;
    Ok(Json(category))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id} - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    AppJson(payload): AppJson<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    Ok(Json(repo.update(id, payload).await?))
}

/// DELETE /api/categories/{id} - 删除分类 (仍有商品时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<MessageResponse>> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.delete(id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}
