//! Report API 模块
//!
//! 匿名路径与调查员路径在服务端强制区分：追踪端点只接受
//! public_id 精确匹配；所有调查员操作经过 [`require_investigator`]。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_investigator;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/api/reports", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/", post(handler::submit))
        .route("/{public_id}/details", get(handler::track));

    let investigator_routes = Router::new()
        .route("/", get(handler::list))
        .route("/id/{internal_id}", get(handler::get_by_internal_id))
        .route("/{internal_id}", patch(handler::update))
        .layer(middleware::from_fn_with_state(state, require_investigator));

    public_routes.merge(investigator_routes)
}
