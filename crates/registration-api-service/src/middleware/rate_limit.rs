//! 分级限流中间件
//!
//! 基于固定窗口计数器按接口类型分级限流：
//! - 报名（/api/register）：最严格，默认 5 req / 15 min
//! - 签到（/api/checkin*）：默认 10 req/min
//! - 管理（/api/admin*）：默认 100 req/min
//! - 其余查询：默认 30 req/min
//!
//! 客户端标识优先取 x-user-id（管理端带工号请求头），
//! 否则取 x-forwarded-for 首个地址 / x-real-ip。

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use registration_shared::config::RateLimitConfig;
use registration_shared::rate_limit::RateLimit;

use crate::error::ApiError;
use crate::state::AppState;

/// 限流中间件
///
/// 计数存储故障时放行，限流服务异常不应拖垮业务
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.rate_limit.enabled {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    if is_exempt_path(&path) {
        return next.run(request).await;
    }

    let (tier, limit) = classify_rate_limit(&path, &state.rate_limit);
    let key = format!("rl:{}:{}", tier, client_id(&request));

    match state.rate_limiter.check(&key, limit).await {
        Ok(decision) if !decision.allowed => {
            warn!(tier, path = %path, "限流触发");
            ApiError::RateLimited {
                retry_after_secs: limit.window_secs,
            }
            .into_response()
        }
        Err(e) => {
            warn!(error = %e, "限流检查失败，跳过限流");
            next.run(request).await
        }
        _ => next.run(request).await,
    }
}

/// 健康检查跳过限流
fn is_exempt_path(path: &str) -> bool {
    path == "/health"
}

/// 按路径前缀归入限流级别
fn classify_rate_limit(path: &str, config: &RateLimitConfig) -> (&'static str, RateLimit) {
    if path.starts_with("/api/register") {
        (
            "registration",
            RateLimit {
                max_requests: config.registration_max_requests,
                window_secs: config.registration_window_secs,
            },
        )
    } else if path.starts_with("/api/checkin") {
        (
            "checkin",
            RateLimit {
                max_requests: config.checkin_max_requests,
                window_secs: config.checkin_window_secs,
            },
        )
    } else if path.starts_with("/api/admin") {
        (
            "admin",
            RateLimit {
                max_requests: config.admin_max_requests,
                window_secs: config.admin_window_secs,
            },
        )
    } else {
        (
            "search",
            RateLimit {
                max_requests: config.search_max_requests,
                window_secs: config.search_window_secs,
            },
        )
    }
}

/// 提取客户端标识
fn client_id(request: &Request<Body>) -> String {
    let headers = request.headers();

    if let Some(user_id) = headers.get("x-user-id").and_then(|v| v.to_str().ok()) {
        if !user_id.is_empty() {
            return user_id.to_string();
        }
    }

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .unwrap_or("unknown")
        .to_string()
}
