//! 签到 API 处理器
//!
//! 签到入口有两个：手工输入/搜索得到胸牌号直接签到，
//! 或扫码得到载荷先解码再查档。解码失败是正常业务结果，提示重扫。

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use registration::badge::is_valid_badge_uid;
use registration::error::RegistrationError;
use registration::qr::decode_badge_payload;
use registration::service::dto::{AttendeeProfile, CheckInRequest, CheckInResponse};

use crate::dto::{ApiResponse, CheckInApiRequest, LookupQuery, ScanRequest};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::sanitize_optional;

/// 执行签到
///
/// POST /api/checkin
pub async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInApiRequest>,
) -> Result<Json<ApiResponse<CheckInResponse>>, ApiError> {
    req.validate()?;

    let resp = state
        .checkin
        .check_in(CheckInRequest {
            badge_uid: req.badge_uid,
            check_in_type: req.check_in_type,
            checked_in_by: sanitize_optional(&req.checked_in_by),
            location: sanitize_optional(&req.location),
            notes: sanitize_optional(&req.notes),
        })
        .await?;

    Ok(Json(ApiResponse::success_with_message(resp, "签到成功")))
}

/// 按胸牌号查询参会者档案（含签到历史）
///
/// GET /api/checkin?badgeUid=
pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupQuery>,
) -> Result<Json<ApiResponse<AttendeeProfile>>, ApiError> {
    if params.badge_uid.is_empty() {
        return Err(ApiError::Validation("胸牌号不能为空".to_string()));
    }

    let profile = state.query.lookup_by_badge(&params.badge_uid).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// 解码扫码载荷并查档
///
/// POST /api/checkin/scan
///
/// 载荷是摄像头扫出来的任意文本，解码失败返回 422 提示重扫，不落日志告警
pub async fn scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ApiResponse<AttendeeProfile>>, ApiError> {
    req.validate()?;

    let payload =
        decode_badge_payload(&req.payload).ok_or(RegistrationError::QrDecodeInvalid)?;

    // 胸牌号形状检查，拦住内容合法但不是本系统胸牌的二维码
    if !is_valid_badge_uid(&payload.badge_uid) {
        return Err(RegistrationError::QrDecodeInvalid.into());
    }

    let profile = state.query.lookup_by_badge(&payload.badge_uid).await?;
    Ok(Json(ApiResponse::success(profile)))
}
