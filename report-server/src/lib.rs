//! TruthLink Report Server - 匿名事件报告追踪服务
//!
//! # 架构概述
//!
//! 本模块是报告服务的主入口，提供以下核心功能：
//!
//! - **报告子系统** (`reports`): 标识符签发、状态机、追加式时间线、
//!   角色投影与并发安全的乐观锁变更
//! - **存储** (`reports::store`): 嵌入式 redb 存储
//! - **认证** (`auth`): 外部认证服务签发的 JWT 验证
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! report-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 验证、调查员角色
//! ├── reports/       # 报告生命周期与追踪子系统
//! ├── services/      # 外部协作方 (地理编码)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod reports;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use reports::{LifecycleManager, QueryEngine, ReportStore};
pub use utils::{AppError, AppResult};

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

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
}

pub fn print_banner() {
    println!(
        r#"
  ______           __  __    __    _       __
 /_  __/______  __/ /_/ /_  / /   (_)___  / /__
  / / / ___/ / / / __/ __ \/ /   / / __ \/ //_/
 / / / /  / /_/ / /_/ / / / /___/ / / / / ,<
/_/ /_/   \__,_/\__/_/ /_/_____/_/_/ /_/_/|_|
    "#
    );
}
