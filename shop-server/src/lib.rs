//! Shop Server - 电商后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 单个 JSON 文档，读写串行化，原子替换提交
//! - **订单** (`orders`): 下单校验、库存扣减、热销排行
//! - **认证** (`auth`): 会话 + JWT + Argon2
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! shop-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT、会话校验、中间件
//! ├── services/      # HTTP 路由装配与启动
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误转换、日志、校验
//! ├── db/            # 文档存储与仓储
//! ├── orders/        # 下单处理器
//! └── stats.rs       # 热销 / 新品 / 精选
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod stats;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::Database;
pub use orders::{OrderAccess, OrderError, place_order};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境：加载 `.env`，按 `LOG_LEVEL` / `LOG_DIR` 初始化日志
pub fn setup_environment() {
    if let Err(e) = dotenv::dotenv() {
        // .env is optional
        if !e.not_found() {
            eprintln!("Failed to load .env: {e}");
        }
    }

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_  ____  ____
  \__ \/ __ \/ __ \/ __ \
 ___/ / / / / /_/ / /_/ /
/____/_/ /_/\____/ .___/
                /_/
    "#
    );
}
