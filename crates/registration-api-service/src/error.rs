//! API 服务错误类型定义
//!
//! 将领域错误映射为 HTTP 状态码与统一响应体。
//! 存储层错误细节只进服务端日志，不随响应外泄。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use registration::error::RegistrationError;

/// API 服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("请求来源不被允许")]
    OriginNotAllowed,

    #[error("请求过于频繁，请稍后重试")]
    RateLimited { retry_after_secs: u64 },

    #[error(transparent)]
    Domain(#[from] RegistrationError),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::OriginNotAllowed => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Domain(err) => match err {
                RegistrationError::EventNotFound(_)
                | RegistrationError::AttendeeNotFound(_) => StatusCode::NOT_FOUND,
                RegistrationError::DuplicateRegistration { .. }
                | RegistrationError::DuplicateEventCode(_)
                | RegistrationError::AlreadyCheckedIn { .. } => StatusCode::CONFLICT,
                RegistrationError::NotEntitled { .. } => StatusCode::FORBIDDEN,
                RegistrationError::QrDecodeInvalid => StatusCode::UNPROCESSABLE_ENTITY,
                RegistrationError::Validation(_) => StatusCode::BAD_REQUEST,
                RegistrationError::BadgeUidConflict(_)
                | RegistrationError::Database(_)
                | RegistrationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::OriginNotAllowed => "ORIGIN_NOT_ALLOWED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(err) => err.error_code(),
        }
    }

    /// 对外展示的错误信息
    ///
    /// 5xx 一律返回通用文案，内部细节只进日志
    fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "服务器内部错误，请稍后重试".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(code = self.error_code(), detail = %self, "API request failed");
        }

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": self.public_message(),
        });

        let mut response = (status, axum::Json(body)).into_response();

        if let Self::RateLimited { retry_after_secs } = self {
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}
