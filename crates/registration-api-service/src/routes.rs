//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 公开路由（报名、签到、查询）
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(handlers::register::register))
        .route("/api/checkin", post(handlers::checkin::check_in))
        .route("/api/checkin", get(handlers::checkin::lookup))
        .route("/api/checkin/scan", post(handlers::checkin::scan))
        .route("/api/attendees", get(handlers::attendee::search))
        .route("/api/attendees", post(handlers::attendee::create))
        .route(
            "/api/attendees/{badge_uid}/qr",
            get(handlers::attendee::qr_payload),
        )
        .route("/api/events", get(handlers::event::list_events))
        .route("/api/events", post(handlers::event::create_event))
}

/// 管理端路由（看板、名单管理、导出）
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/attendees", get(handlers::attendee::admin_list))
        .route(
            "/api/admin/attendees/export",
            get(handlers::export::export_attendees),
        )
        .route("/api/admin/attendees/{id}", put(handlers::attendee::update))
        .route(
            "/api/admin/attendees/{id}",
            delete(handlers::attendee::delete),
        )
        .route("/api/admin/analytics", get(handlers::stats::analytics))
}

/// 组装完整路由
///
/// 中间件从外到内：限流 -> 来源校验 -> handler
/// （axum 后添加的 layer 在外层，先执行）
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(public_routes())
        .merge(admin_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::request_validation_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::rate_limit_middleware,
        ))
        .with_state(state)
}
