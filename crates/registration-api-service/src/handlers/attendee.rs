//! 参会者查询与管理 API 处理器

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::info;
use validator::Validate;

use registration::models::{Attendee, AttendeeListFilter, AttendeeUpdate};
use registration::service::dto::{AttendeeListItem, AttendeeListPage, RegistrationRequest, RegistrationResponse};

use crate::dto::{
    AdminListQuery, ApiResponse, CreateAttendeeRequest, QrPayloadDto, SearchQuery,
    UpdateAttendeeRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{sanitize_input, sanitize_optional};

/// 搜索结果条数默认值与上限
const DEFAULT_SEARCH_LIMIT: i64 = 20;
const MAX_SEARCH_LIMIT: i64 = 100;

/// 管理端列表分页默认值与上限
const DEFAULT_PAGE_LIMIT: i64 = 100;
const MAX_PAGE_LIMIT: i64 = 500;

/// 参会者搜索（姓名/邮箱/胸牌号模糊匹配）
///
/// GET /api/attendees?query=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<AttendeeListItem>>>, ApiError> {
    let query = sanitize_input(&params.query);
    if query.is_empty() {
        return Err(ApiError::Validation("搜索关键字不能为空".to_string()));
    }

    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let items = state
        .query
        .search_attendees(&query, params.event_id, limit)
        .await?;

    Ok(Json(ApiResponse::success(items)))
}

/// 胸牌二维码载荷（打印/展示用）
///
/// GET /api/attendees/{badge_uid}/qr
pub async fn qr_payload(
    State(state): State<AppState>,
    Path(badge_uid): Path<String>,
) -> Result<Json<ApiResponse<QrPayloadDto>>, ApiError> {
    let payload = state.query.badge_qr_payload(&badge_uid).await?;

    Ok(Json(ApiResponse::success(QrPayloadDto {
        badge_uid,
        payload,
    })))
}

/// 管理端现场录入参会者（邮箱可缺省）
///
/// POST /api/attendees
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAttendeeRequest>,
) -> Result<Json<ApiResponse<RegistrationResponse>>, ApiError> {
    req.validate()?;

    let resp = state
        .registration
        .register(RegistrationRequest {
            event_id: req.event_id,
            full_name: sanitize_input(&req.full_name),
            email: sanitize_optional(&req.email),
            phone: sanitize_optional(&req.phone),
            category: req.category,
            institution: sanitize_optional(&req.institution),
            meal_entitled: req.meal_entitled,
            kit_entitled: req.kit_entitled,
            notes: sanitize_optional(&req.notes),
        })
        .await?;

    Ok(Json(ApiResponse::success_with_message(resp, "录入成功")))
}

/// 管理端参会者分页列表
///
/// GET /api/admin/attendees
pub async fn admin_list(
    State(state): State<AppState>,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<ApiResponse<AttendeeListPage>>, ApiError> {
    let filter = AttendeeListFilter {
        event_id: params.event_id,
        search: params
            .search
            .as_deref()
            .map(sanitize_input)
            .filter(|s| !s.is_empty()),
        limit: params
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT),
        offset: params.offset.unwrap_or(0).max(0),
    };

    let page = state.query.list_attendees(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// 管理端更新参会者（部分更新；权益开关只能在这里变更）
///
/// PUT /api/admin/attendees/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAttendeeRequest>,
) -> Result<Json<ApiResponse<Attendee>>, ApiError> {
    req.validate()?;

    let update = AttendeeUpdate {
        full_name: sanitize_optional(&req.full_name),
        email: sanitize_optional(&req.email),
        phone: sanitize_optional(&req.phone),
        category: req.category,
        institution: sanitize_optional(&req.institution),
        meal_entitled: req.meal_entitled,
        kit_entitled: req.kit_entitled,
        notes: sanitize_optional(&req.notes),
    };

    let attendee = state.query.update_attendee(id, &update).await?;

    info!(attendee_id = id, badge_uid = %attendee.badge_uid, "Attendee updated");
    Ok(Json(ApiResponse::success_with_message(attendee, "更新成功")))
}

/// 管理端删除参会者（签到记录级联删除）
///
/// DELETE /api/admin/attendees/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.query.delete_attendee(id).await?;

    info!(attendee_id = id, "Attendee deleted");
    Ok(Json(ApiResponse::<()>::success_empty()))
}
