//! 公开报名 API 处理器

use axum::{Json, extract::State};
use tracing::info;
use validator::Validate;

use registration::service::dto::{RegistrationRequest, RegistrationResponse};

use crate::dto::{ApiResponse, RegisterRequest};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{sanitize_input, sanitize_optional};

/// 公开报名
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegistrationResponse>>, ApiError> {
    req.validate()?;

    let request = RegistrationRequest {
        event_id: req.event_id,
        full_name: sanitize_input(&req.full_name),
        email: Some(sanitize_input(&req.email)),
        phone: Some(sanitize_input(&req.phone)),
        category: req.category,
        institution: Some(sanitize_input(&req.institution)),
        meal_entitled: req.meal_entitled,
        kit_entitled: req.kit_entitled,
        notes: sanitize_optional(&req.notes),
    };

    let resp = state.registration.register(request).await?;

    info!(
        badge_uid = %resp.badge_uid,
        event_name = %resp.event_name,
        "Registration successful"
    );

    Ok(Json(ApiResponse::success_with_message(resp, "报名成功")))
}
