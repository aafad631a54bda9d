//! 认证授权模块
//!
//! 提供 JWT 认证、会话校验和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`authenticate`] - bearer token → [`CurrentUser`]
//! - [`require_auth`] - 认证中间件
//! - [`require_admin`] - 管理员检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, authenticate, require_admin, require_auth};
pub use password::{hash_password, verify_password};
