//! 认证中间件
//!
//! 为 bearer token 认证和管理员授权提供 Axum 中间件。
//! 一个令牌必须同时满足：
//! 1. 存在于 `sessions` 集合中且未过期
//! 2. JWT 签名与声明有效，`sub` 与会话用户一致

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::{SessionLookup, SessionRepository, UserRepository};
use crate::security_log;

/// Routes that never need a token
const PUBLIC_ROUTES: &[&str] = &["/api/register", "/api/login", "/api/bootstrap-admin"];

/// Read-only catalog routes, public for GET
const PUBLIC_READ_PREFIXES: &[&str] = &["/api/products", "/api/categories", "/api/stats"];

fn is_public(method: &Method, path: &str) -> bool {
    if PUBLIC_ROUTES.contains(&path) {
        return true;
    }
    *method == Method::GET
        && PUBLIC_READ_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

/// Resolve a bearer token to the user behind it.
///
/// An expired session is removed before `TokenExpired` is returned.
pub async fn authenticate(state: &ServerState, token: &str) -> Result<CurrentUser, AppError> {
    let now = shared::util::now_millis();
    let session = match SessionRepository::new(state.db.clone())
        .lookup(token, now)
        .await?
    {
        SessionLookup::Active(session) => session,
        SessionLookup::Expired => {
            security_log!("WARN", "session_expired", reason = "expired");
            return Err(AppError::token_expired());
        }
        SessionLookup::Unknown => {
            security_log!("WARN", "auth_failed", reason = "unknown_session");
            return Err(AppError::invalid_token("Invalid token"));
        }
    };

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string());
        AppError::from(e)
    })?;

    if claims.sub != session.user_id.to_string() {
        security_log!(
            "WARN",
            "auth_failed",
            reason = "subject_mismatch",
            session_user = session.user_id
        );
        return Err(AppError::from(JwtError::InvalidToken(
            "subject does not match session".to_string(),
        )));
    }

    let user = UserRepository::new(state.db.clone())
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::invalid_token("Invalid token"))?;

    Ok(CurrentUser {
        id: user.id,
        email: user.email,
        role: user.role,
    })
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取令牌并校验。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health`)
/// - `/api/register`, `/api/login`, `/api/bootstrap-admin`
/// - `GET /api/products...`, `GET /api/categories...`, `GET /api/stats`
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 / 非 Bearer | 401 NotAuthenticated |
/// | 会话过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header);

    let Some(token) = token else {
        security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
        return Err(AppError::not_authenticated());
    };

    let user = authenticate(&state, token).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 管理员中间件 - 要求管理员角色
///
/// 必须位于 [`require_auth`] 之后。非管理员返回 403 AdminRequired。
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.current_user()?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            email = user.email.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}

/// 从请求中提取 CurrentUser 的扩展方法
pub trait CurrentUserExt {
    /// 从请求扩展中获取 CurrentUser
    ///
    /// # 错误
    ///
    /// 未认证返回 401 NotAuthenticated
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or_else(AppError::not_authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public(&Method::POST, "/api/login"));
        assert!(is_public(&Method::POST, "/api/register"));
        assert!(is_public(&Method::GET, "/api/products"));
        assert!(is_public(&Method::GET, "/api/products/3/comments"));
        assert!(is_public(&Method::GET, "/api/categories"));
        assert!(is_public(&Method::GET, "/api/stats"));
    }

    #[test]
    fn test_gated_routes() {
        assert!(!is_public(&Method::POST, "/api/products"));
        assert!(!is_public(&Method::PUT, "/api/stats/featured"));
        assert!(!is_public(&Method::GET, "/api/orders"));
        assert!(!is_public(&Method::GET, "/api/profile"));
        assert!(!is_public(&Method::GET, "/api/productsx"));
        assert!(!is_public(&Method::POST, "/api/products/1/like"));
    }
}
