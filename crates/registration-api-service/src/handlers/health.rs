//! 健康检查处理器

use std::time::Instant;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::warn;

use crate::dto::{HealthServices, HealthStatus, ServiceHealth};
use crate::state::AppState;

/// 健康检查
///
/// GET /health
///
/// 数据库探活失败时返回 503，负载均衡据此摘除实例
pub async fn health(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let elapsed_ms = started.elapsed().as_millis();

    if !db_ok {
        warn!(response_time_ms = elapsed_ms, "Health check failed - database unreachable");
    }

    let db_status = if db_ok { "healthy" } else { "unhealthy" };
    let body = HealthStatus {
        status: db_status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.clone(),
        services: HealthServices {
            database: ServiceHealth {
                status: db_status,
                response_time_ms: elapsed_ms,
            },
            api: ServiceHealth {
                status: "healthy",
                response_time_ms: elapsed_ms,
            },
        },
    };

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(body)).into_response()
}
