//! Authentication Handlers
//!
//! Register, login, logout and profile. Every successful login issues a new
//! session whose token is a JWT expiring together with the session.

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};

use crate::api::extract::AppJson;
use crate::AppError;
use crate::auth::{CurrentUser, JwtService, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{NewUser, SessionRepository, UserRepository};
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_required_text};
use shared::client::{
    AuthResponse, BootstrapAdminRequest, LoginRequest, MessageResponse, RegisterRequest, UserInfo,
};
use shared::models::{Role, Session, User};
use shared::util::{now_millis, now_secs};

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "password";

/// Create a session for `user` and sign its token
async fn issue_session(state: &ServerState, user: &User) -> Result<AuthResponse, AppError> {
    let now = now_millis();
    let expires_at = now + state.config.session_ttl_millis();
    let token = state
        .get_jwt_service()
        .generate_token(user.id, &user.email, user.role, expires_at)?;

    SessionRepository::new(state.db.clone())
        .insert(
            Session {
                token: token.clone(),
                user_id: user.id,
                expires: expires_at,
            },
            now,
        )
        .await?;

    Ok(AuthResponse {
        token,
        expires_at,
        user: UserInfo::from(user),
    })
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// POST /api/register - 注册新用户 (角色固定为 user)
pub async fn register(
    State(state): State<ServerState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_required_text(&req.firstname, "firstname", MAX_NAME_LEN)?;
    validate_required_text(&req.lastname, "lastname", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let user = UserRepository::new(state.db.clone())
        .create(
            NewUser {
                firstname: req.firstname.trim().to_string(),
                lastname: req.lastname.trim().to_string(),
                email: req.email,
                password_hash: hash(&req.password)?,
                role: Role::User,
            },
            now_secs(),
        )
        .await?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");
    let response = issue_session(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/login - 登录
///
/// Unknown email and wrong password fail with the same error.
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = UserRepository::new(state.db.clone())
        .find_by_email(&req.email)
        .await?;

    let user = match user {
        Some(user) if verify_password(&req.password, &user.password) => user,
        found => {
            let reason = if found.is_some() {
                "invalid_password"
            } else {
                "user_not_found"
            };
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = reason);
            return Err(AppError::invalid_credentials());
        }
    };

    let response = issue_session(&state, &user).await?;
    tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");
    Ok(Json(response))
}

/// POST /api/logout - 注销当前会话
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .ok_or_else(AppError::not_authenticated)?;

    SessionRepository::new(state.db.clone()).remove(token).await?;
    tracing::info!(user_id = user.id, "User logged out");
    Ok(Json(MessageResponse::new("Logged out")))
}

/// GET /api/profile - 当前用户信息 (不含密码)
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AppError> {
    let record = UserRepository::new(state.db.clone())
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::new(shared::ErrorCode::UserNotFound))?;
    Ok(Json(UserInfo::from(&record)))
}

/// POST /api/bootstrap-admin - 创建首个管理员 (仅开发环境)
pub async fn bootstrap_admin(
    State(state): State<ServerState>,
    body: Option<AppJson<BootstrapAdminRequest>>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    if state.config.is_production() {
        security_log!("WARN", "bootstrap_refused", environment = state.config.environment.clone());
        return Err(AppError::permission_denied(
            "Admin bootstrap is disabled in production",
        ));
    }

    let req = body.map(|AppJson(req)| req).unwrap_or_default();
    let email = req.email.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
    let password = req
        .password
        .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());
    validate_email(&email)?;
    validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;

    let admin = UserRepository::new(state.db.clone())
        .create_first_admin(
            NewUser {
                firstname: "Admin".to_string(),
                lastname: "User".to_string(),
                email,
                password_hash: hash(&password)?,
                role: Role::Admin,
            },
            now_secs(),
        )
        .await?;

    security_log!("INFO", "admin_bootstrapped", user_id = admin.id, email = admin.email.clone());
    let response = issue_session(&state, &admin).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
