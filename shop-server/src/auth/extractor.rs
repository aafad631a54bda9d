//! Current user extractor
//!
//! Handlers take [`CurrentUser`] as an argument. The auth middleware has
//! normally resolved it already; otherwise the bearer token is checked here.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::models::Role;

use crate::AppError;
use crate::auth::{JwtService, authenticate};
use crate::core::ServerState;
use crate::security_log;

/// 当前用户上下文
///
/// 由认证中间件创建，注入到请求处理函数。角色取自存储中的用户记录，
/// 而不是令牌。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: u64,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_header);

        let Some(token) = token else {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
            return Err(AppError::not_authenticated());
        };

        let user = authenticate(state, token).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
