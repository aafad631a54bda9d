//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。令牌的过期时间与会话 (session) 一致；
//! 一个令牌只有在 `sessions` 集合中存在且未过期时才有效。

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;

/// Minimum accepted length of `JWT_SECRET`
pub const MIN_SECRET_LEN: usize = 32;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (至少 32 字节)
    pub secret: String,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl JwtConfig {
    /// 从环境变量加载 (`JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE`)
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            secret: load_jwt_secret()?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "shop-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "shop-clients".to_string()),
        })
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Random id so two tokens issued in the same second differ
    pub jti: String,
    /// 过期时间戳 (秒)
    pub exp: i64,
    /// 签发时间戳 (秒)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// 生成安全的 JWT 密钥 (64 个十六进制字符)
pub fn generate_secure_jwt_secret() -> Result<String, JwtError> {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32]; // 256-bit key

    rng.fill(&mut key)
        .map_err(|_| JwtError::ConfigError("Failed to generate secure random key".to_string()))?;

    Ok(key.iter().map(|b| format!("{b:02x}")).collect())
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                )));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "⚠️  JWT_SECRET not set! Generating temporary key for development, sessions will not survive a restart."
                );
                generate_secure_jwt_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in release builds".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 使用随机密钥创建 (测试与开发)
    pub fn new_with_secure_key() -> Result<Self, JwtError> {
        Ok(Self::with_config(JwtConfig {
            secret: generate_secure_jwt_secret()?,
            issuer: "shop-server".to_string(),
            audience: "shop-clients".to_string(),
        }))
    }

    /// 为用户生成新令牌，`expires_at` 为会话过期时间 (毫秒)
    pub fn generate_token(
        &self,
        user_id: u64,
        email: &str,
        role: Role,
        expires_at: i64,
    ) -> Result<String, JwtError> {
        let jti: u128 = rand::thread_rng().r#gen();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            jti: format!("{jti:032x}"),
            exp: expires_at / 1000,
            iat: Utc::now().timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_one_hour() -> i64 {
        shared::util::now_millis() + 3_600_000
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = JwtService::new_with_secure_key().unwrap();
        let token = service
            .generate_token(42, "ada@example.com", Role::Admin, in_one_hour())
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iss, "shop-server");
    }

    #[test]
    fn test_tokens_are_unique() {
        let service = JwtService::new_with_secure_key().unwrap();
        let exp = in_one_hour();
        let a = service.generate_token(1, "a@b.c", Role::User, exp).unwrap();
        let b = service.generate_token(1, "a@b.c", Role::User, exp).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new_with_secure_key().unwrap();
        // well past the default leeway
        let exp = shared::util::now_millis() - 3_600_000;
        let token = service.generate_token(1, "a@b.c", Role::User, exp).unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let ours = JwtService::new_with_secure_key().unwrap();
        let theirs = JwtService::new_with_secure_key().unwrap();
        let token = theirs
            .generate_token(1, "a@b.c", Role::Admin, in_one_hour())
            .unwrap();
        assert!(matches!(
            ours.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
        assert!(ours.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_secure_key_generation() {
        let key1 = generate_secure_jwt_secret().unwrap();
        let key2 = generate_secure_jwt_secret().unwrap();
        assert_ne!(key1, key2);
        assert_eq!(key1.len(), 64);
        assert!(key1.len() >= MIN_SECRET_LEN);
    }
}
