use std::sync::Arc;

use anyhow::Context;

use crate::auth::JwtService;
use crate::core::Config;
use crate::reports::{LifecycleManager, QueryEngine, ReportStore};
use crate::services::GeocodingService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / redb 内部共享实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | ReportStore | 报告存储 (redb) |
/// | lifecycle | LifecycleManager | 状态机与时间线 |
/// | query | QueryEngine | 调查员列表查询 |
/// | geocoding | GeocodingService | 地理编码 (可降级) |
/// | jwt_service | Arc<JwtService> | JWT 验证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 报告存储
    pub store: ReportStore,
    /// 生命周期管理
    pub lifecycle: LifecycleManager,
    /// 列表查询引擎
    pub query: QueryEngine,
    /// 地理编码服务
    pub geocoding: GeocodingService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 报告存储 (work_dir/database/reports.redb)
    /// 3. 生命周期管理与查询引擎
    /// 4. 地理编码与 JWT 服务
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config
            .ensure_work_dir_structure()
            .context("Failed to create work directory structure")?;

        let db_path = config.database_dir().join("reports.redb");
        let store = ReportStore::open(&db_path)
            .with_context(|| format!("Failed to open report store at {}", db_path.display()))?;
        tracing::info!(path = %db_path.display(), "report store opened");

        let lifecycle = LifecycleManager::new(store.clone());
        let query = QueryEngine::new(store.clone());
        let geocoding =
            GeocodingService::new(config).context("Failed to build geocoding client")?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            store,
            lifecycle,
            query,
            geocoding,
            jwt_service,
        })
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
