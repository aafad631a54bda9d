use std::path::{Path, PathBuf};

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件由 dotenv 加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | DB_FILE | db.json | 数据文件 (相对路径基于 WORK_DIR) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (stdout) | 日志目录 |
/// | SESSION_TTL_HOURS | 168 | 会话有效期 (小时) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时 (毫秒) |
/// | JWT_SECRET / JWT_ISSUER / JWT_AUDIENCE | | JWT 配置 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/shop HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: PathBuf,
    /// 数据文件
    pub db_file: PathBuf,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 会话有效期 (小时)
    pub session_ttl_hours: i64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self> {
        let session_ttl_hours: i64 = env_or("SESSION_TTL_HOURS", 168);
        if session_ttl_hours <= 0 {
            return Err(ServerError::Config(
                "SESSION_TTL_HOURS must be positive".to_string(),
            ));
        }

        Ok(Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            db_file: std::env::var("DB_FILE")
                .unwrap_or_else(|_| "db.json".into())
                .into(),
            http_port: env_or("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            session_ttl_hours,
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
            jwt: JwtConfig::from_env()?,
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<PathBuf>, http_port: u16, jwt: JwtConfig) -> Self {
        Self {
            work_dir: work_dir.into(),
            db_file: PathBuf::from("db.json"),
            http_port,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            session_ttl_hours: 168,
            shutdown_timeout_ms: 10_000,
            jwt,
        }
    }

    /// 数据文件的完整路径
    pub fn db_path(&self) -> PathBuf {
        if self.db_file.is_absolute() {
            self.db_file.clone()
        } else {
            self.work_dir.join(&self.db_file)
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// 会话有效期 (毫秒)
    pub fn session_ttl_millis(&self) -> i64 {
        self.session_ttl_hours * 3_600_000
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "x".repeat(32),
            issuer: "shop-server".into(),
            audience: "shop-clients".into(),
        }
    }

    #[test]
    fn test_db_path_resolution() {
        let mut config = Config::with_overrides("/srv/shop", 3000, jwt());
        assert_eq!(config.db_path(), PathBuf::from("/srv/shop/db.json"));

        config.db_file = PathBuf::from("/var/lib/other.json");
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/other.json"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::with_overrides("./data", 3000, jwt());
        assert_eq!(config.session_ttl_millis(), 7 * 24 * 3_600_000);
        assert!(config.is_development());
        assert!(!config.is_production());
    }
}
