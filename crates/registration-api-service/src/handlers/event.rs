//! 活动管理 API 处理器

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use registration::models::Event;

use crate::dto::{ApiResponse, CreateEventRequest, EventsQuery};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::sanitize_input;

/// 活动列表
///
/// GET /api/events?active=true
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let events = state
        .events
        .list_events(params.active.unwrap_or(false))
        .await?;

    Ok(Json(ApiResponse::success(events)))
}

/// 创建活动
///
/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    req.validate()?;

    let event = state
        .events
        .create_event(
            &sanitize_input(&req.event_code),
            &sanitize_input(&req.event_name),
            req.event_date,
        )
        .await?;

    Ok(Json(ApiResponse::success_with_message(event, "活动创建成功")))
}
