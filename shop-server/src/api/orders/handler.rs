//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::MessageResponse;
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::util::now_secs;

use crate::api::extract::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::orders::OrderAccess;
use crate::utils::{AppError, AppResult};

/// POST /api/orders - 下单
///
/// 400 with a `product_id` detail when an item names an unknown product or
/// asks for more than the stock.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .place(user.id, payload, now_secs())
        .await
        .map_err(|e| {
            tracing::warn!(user_id = user.id, error = %e, "Order rejected");
            AppError::from(e)
        })?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - 当前用户的订单 (管理员可见全部)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    Ok(Json(repo.find_visible(OrderAccess::for_user(&user)).await?))
}

/// PUT /api/orders/{id} - 更新状态 / 地址
///
/// Administrators only. A valid token is not enough: other signed-in users,
/// including the order's owner, get 403 `AdminRequired`.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<u64>,
    AppJson(payload): AppJson<OrderUpdate>,
) -> AppResult<Json<Order>> {
    if !OrderAccess::for_user(&user).can_manage() {
        return Err(AppError::admin_required());
    }
    let repo = OrderRepository::new(state.db.clone());
    Ok(Json(repo.update(id, payload).await?))
}

/// DELETE /api/orders/{id} - 删除订单
///
/// Administrators only, like [`update`]. Non-admins get 403 `AdminRequired`.
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<u64>,
) -> AppResult<Json<MessageResponse>> {
    if !OrderAccess::for_user(&user).can_manage() {
        return Err(AppError::admin_required());
    }
    let repo = OrderRepository::new(state.db.clone());
    repo.delete(id).await?;
    Ok(Json(MessageResponse::new("Order deleted")))
}
