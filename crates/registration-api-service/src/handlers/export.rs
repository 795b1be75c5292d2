//! 参会者 CSV 导出处理器

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;

use registration::models::AttendeeListFilter;

use crate::dto::ExportQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// 单次导出的行数上限
const EXPORT_LIMIT: i64 = 10_000;

/// 导出参会者名单为 CSV
///
/// GET /api/admin/attendees/export?eventId=
pub async fn export_attendees(
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let page = state
        .query
        .list_attendees(&AttendeeListFilter {
            event_id: params.event_id,
            search: None,
            limit: EXPORT_LIMIT,
            offset: 0,
        })
        .await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "badge_uid",
            "full_name",
            "email",
            "phone",
            "category",
            "institution",
            "event",
            "meal_entitled",
            "kit_entitled",
            "checked_in",
            "registered_at",
        ])
        .map_err(|e| ApiError::Internal(format!("CSV 表头写入失败: {}", e)))?;

    for item in &page.items {
        let attendee = &item.attendee;
        let checked_in: String = item
            .check_ins
            .iter()
            .map(|c| c.check_in_type.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let registered_at = attendee.created_at.to_rfc3339();

        writer
            .write_record([
                attendee.badge_uid.as_str(),
                attendee.full_name.as_str(),
                attendee.email.as_deref().unwrap_or(""),
                attendee.phone.as_deref().unwrap_or(""),
                attendee.category.as_str(),
                attendee.institution.as_deref().unwrap_or(""),
                item.event
                    .as_ref()
                    .map(|e| e.event_name.as_str())
                    .unwrap_or(""),
                if attendee.meal_entitled { "yes" } else { "no" },
                if attendee.kit_entitled { "yes" } else { "no" },
                checked_in.as_str(),
                registered_at.as_str(),
            ])
            .map_err(|e| ApiError::Internal(format!("CSV 行写入失败: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV 缓冲回收失败: {}", e)))?;

    info!(rows = page.items.len(), event_id = ?params.event_id, "Attendees exported");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendees.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
