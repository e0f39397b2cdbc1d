//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`reports`] - 报告提交、追踪与调查员操作

pub mod health;
pub mod reports;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(reports::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
