//! 报名签到服务错误类型
//!
//! 定义服务层的业务错误和系统错误

use thiserror::Error;

use crate::models::CheckInType;

/// 报名签到服务错误类型
#[derive(Debug, Error)]
pub enum RegistrationError {
    // === 活动相关错误 ===
    #[error("活动不存在: {0}")]
    EventNotFound(i64),

    #[error("活动码已存在: {0}")]
    DuplicateEventCode(String),

    // === 报名相关错误 ===
    #[error("参会者不存在: {0}")]
    AttendeeNotFound(String),

    #[error("该邮箱已报名此活动: event_id={event_id}, email={email}")]
    DuplicateRegistration { event_id: i64, email: String },

    #[error("胸牌号冲突: {0}")]
    BadgeUidConflict(String),

    // === 签到相关错误 ===
    #[error("参会者无 {check_in_type} 权益")]
    NotEntitled { check_in_type: CheckInType },

    #[error("已完成 {check_in_type} 签到")]
    AlreadyCheckedIn { check_in_type: CheckInType },

    // === 二维码相关错误 ===
    #[error("二维码载荷无效，请重新扫码")]
    QrDecodeInvalid,

    // === 系统错误 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 报名签到服务 Result 类型别名
pub type Result<T> = std::result::Result<T, RegistrationError>;

impl RegistrationError {
    /// 检查是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::BadgeUidConflict(_))
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::BadgeUidConflict(_)
        )
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EventNotFound(_) => "EVENT_NOT_FOUND",
            Self::DuplicateEventCode(_) => "DUPLICATE_EVENT_CODE",
            Self::AttendeeNotFound(_) => "ATTENDEE_NOT_FOUND",
            Self::DuplicateRegistration { .. } => "DUPLICATE_REGISTRATION",
            Self::BadgeUidConflict(_) => "BADGE_UID_CONFLICT",
            Self::NotEntitled { .. } => "NOT_ENTITLED",
            Self::AlreadyCheckedIn { .. } => "ALREADY_CHECKED_IN",
            Self::QrDecodeInvalid => "QR_DECODE_INVALID",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
