//! Feedback API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Comment, CommentCreate, LikeToggle};
use shared::util::now_secs;

use crate::api::extract::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::FeedbackRepository;
use crate::utils::AppResult;

/// POST /api/products/{id}/like - 点赞 / 取消点赞
pub async fn toggle_like(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<u64>,
) -> AppResult<Json<LikeToggle>> {
    let repo = FeedbackRepository::new(state.db.clone());
    let toggle = repo.toggle_like(user.id, id, now_secs()).await?;
    tracing::debug!(user_id = user.id, product_id = id, liked = toggle.liked, "Like toggled");
    Ok(Json(toggle))
}

/// POST /api/products/{id}/comment - 发表评论
pub async fn add_comment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<u64>,
    AppJson(payload): AppJson<CommentCreate>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let repo = FeedbackRepository::new(state.db.clone());
    let comment = repo.add_comment(user.id, id, payload, now_secs()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/products/{id}/comments - 商品评论列表
pub async fn list_comments(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Vec<Comment>>> {
    let repo = FeedbackRepository::new(state.db.clone());
    Ok(Json(repo.comments_for(id).await?))
}
