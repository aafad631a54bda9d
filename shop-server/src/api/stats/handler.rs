//! Stats API Handlers

use axum::{Json, extract::State};
use shared::models::{FeaturedUpdate, StatsReport};

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::stats;
use crate::utils::AppResult;

/// GET /api/stats - 热销 / 新品 / 精选，各最多 10 个
pub async fn get_stats(State(state): State<ServerState>) -> AppResult<Json<StatsReport>> {
    Ok(Json(stats::get_stats(&state.db).await?))
}

/// PUT /api/stats/featured - 替换精选列表
pub async fn set_featured(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<FeaturedUpdate>,
) -> AppResult<Json<FeaturedUpdate>> {
    let featured = stats::set_featured(&state.db, payload.featured).await?;
    tracing::info!(count = featured.len(), "Featured list replaced");
    Ok(Json(FeaturedUpdate { featured }))
}
