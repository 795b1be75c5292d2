//! 请求来源校验中间件
//!
//! 报名表单面向公网，按来源白名单做一层前缀校验；
//! 写请求强制 application/json，拦掉表单提交类的探测流量。

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// 请求来源校验中间件
pub async fn request_validation_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // 来源白名单：配置为空表示不校验；浏览器以外的客户端不带 Origin，放行
    if !state.allowed_origins.is_empty() {
        let origin = request
            .headers()
            .get(header::ORIGIN)
            .or_else(|| request.headers().get(header::REFERER))
            .and_then(|v| v.to_str().ok());

        if let Some(origin) = origin {
            if !origin_allowed(&state.allowed_origins, origin) {
                warn!(origin, "请求来源被拒绝");
                return ApiError::OriginNotAllowed.into_response();
            }
        }
    }

    // 写请求强制 JSON 体
    if matches!(*request.method(), Method::POST | Method::PUT) {
        let is_json = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if !is_json {
            return ApiError::Validation("Content-Type 必须为 application/json".to_string())
                .into_response();
        }
    }

    next.run(request).await
}

/// 来源是否命中白名单（前缀匹配）
fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.iter().any(|a| origin.starts_with(a.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_allowed_prefix_match() {
        let allowed = vec!["https://reg.example.com".to_string()];
        assert!(origin_allowed(&allowed, "https://reg.example.com"));
        assert!(origin_allowed(&allowed, "https://reg.example.com/register"));
        assert!(!origin_allowed(&allowed, "https://evil.example.com"));
    }

    #[test]
    fn test_origin_allowed_multiple_entries() {
        let allowed = vec![
            "http://localhost:3000".to_string(),
            "https://reg.example.com".to_string(),
        ];
        assert!(origin_allowed(&allowed, "http://localhost:3000"));
        assert!(!origin_allowed(&allowed, "http://localhost:4000"));
    }
}
