use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::Database;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，Clone 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Database | 文档数据库 (读写串行化) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// ```ignore
/// let repo = ProductRepository::new(state.db.clone());
/// let jwt = state.get_jwt_service();
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 文档数据库
    pub db: Database,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试中使用内存数据库)
    pub fn new(config: Config, db: Database) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开 JSON 数据文件 (不存在则创建空模板)
    /// 3. 加载一次以校验文件完整性
    pub async fn initialize(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(config.work_dir()).await?;

        let db_path = config.db_path();
        let db = Database::open(&db_path);
        let snapshot = db.read().await?;
        tracing::info!(
            path = %db_path.display(),
            products = snapshot.catalogue.len(),
            orders = snapshot.orders.len(),
            users = snapshot.users.len(),
            "Document loaded"
        );

        Ok(Self::new(config.clone(), db))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
