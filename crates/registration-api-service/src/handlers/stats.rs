//! 统计看板 API 处理器
//!
//! 聚合查询直接走 SQL，事件过滤统一用 `($n::bigint IS NULL OR ...)` 形式，
//! 避免为有无过滤条件各写一份语句。

use std::collections::{BTreeMap, HashMap};

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;

use registration::error::RegistrationError;

use crate::dto::{
    AnalyticsDto, AnalyticsOverview, AnalyticsQuery, ApiResponse, CheckInBreakdown, DailyStat,
    EntitlementsBreakdown, TopEvent,
};
use crate::error::ApiError;
use crate::state::AppState;

/// 统计周期字符串解析为起始时间，未知取值回落到 7 天
fn period_start(period: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let days = match period {
        "1d" => 1,
        "7d" => 7,
        "30d" => 30,
        "90d" => 90,
        "1y" => 365,
        _ => 7,
    };
    now - Duration::days(days)
}

/// 统计看板
///
/// GET /api/admin/analytics?period=7d&eventId=
pub async fn analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<AnalyticsDto>>, ApiError> {
    let period = params.period.as_deref().unwrap_or("7d").to_string();
    let now = Utc::now();
    let start = period_start(&period, now);
    let event_id = params.event_id;
    let pool = &state.pool;

    let total_attendees: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM attendees
        WHERE created_at >= $1 AND ($2::bigint IS NULL OR event_id = $2)
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_one(pool)
    .await
    .map_err(RegistrationError::from)?;

    let total_check_ins: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM check_ins ci
        JOIN attendees a ON a.id = ci.attendee_id
        WHERE ci.checked_in_at >= $1 AND ($2::bigint IS NULL OR a.event_id = $2)
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_one(pool)
    .await
    .map_err(RegistrationError::from)?;

    let total_events: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM events
        WHERE created_at >= $1 AND ($2::bigint IS NULL OR id = $2)
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_one(pool)
    .await
    .map_err(RegistrationError::from)?;

    let (meal, kit, general): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE ci.check_in_type = 'meal'),
            COUNT(*) FILTER (WHERE ci.check_in_type = 'kit'),
            COUNT(*) FILTER (WHERE ci.check_in_type = 'general')
        FROM check_ins ci
        JOIN attendees a ON a.id = ci.attendee_id
        WHERE ci.checked_in_at >= $1 AND ($2::bigint IS NULL OR a.event_id = $2)
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_one(pool)
    .await
    .map_err(RegistrationError::from)?;

    let category_rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT category, COUNT(*) FROM attendees
        WHERE created_at >= $1 AND ($2::bigint IS NULL OR event_id = $2)
        GROUP BY category
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_all(pool)
    .await
    .map_err(RegistrationError::from)?;

    let (meal_entitled, kit_entitled, both_entitled): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE meal_entitled),
            COUNT(*) FILTER (WHERE kit_entitled),
            COUNT(*) FILTER (WHERE meal_entitled AND kit_entitled)
        FROM attendees
        WHERE created_at >= $1 AND ($2::bigint IS NULL OR event_id = $2)
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_one(pool)
    .await
    .map_err(RegistrationError::from)?;

    let daily_stats =
        daily_stats(pool, start, now, event_id).await.map_err(RegistrationError::from)?;

    let top_event_rows: Vec<(i64, String, NaiveDate, i64)> = sqlx::query_as(
        r#"
        SELECT e.id, e.event_name, e.event_date, COUNT(a.id)
        FROM events e
        LEFT JOIN attendees a ON a.event_id = e.id
        WHERE e.created_at >= $1 AND ($2::bigint IS NULL OR e.id = $2)
        GROUP BY e.id, e.event_name, e.event_date
        ORDER BY e.event_date DESC
        LIMIT 10
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_all(pool)
    .await
    .map_err(RegistrationError::from)?;

    let dto = AnalyticsDto {
        overview: AnalyticsOverview {
            total_attendees,
            total_check_ins,
            total_events,
            period,
        },
        check_in_breakdown: CheckInBreakdown { meal, kit, general },
        category_breakdown: category_rows.into_iter().collect::<HashMap<_, _>>(),
        entitlements_breakdown: EntitlementsBreakdown {
            meal_entitled,
            kit_entitled,
            both_entitled,
        },
        daily_stats,
        top_events: top_event_rows
            .into_iter()
            .map(|(id, name, date, attendee_count)| TopEvent {
                id,
                name,
                date,
                attendee_count,
            })
            .collect(),
    };

    Ok(Json(ApiResponse::success(dto)))
}

/// 逐日报名数与签到数
///
/// 两个 GROUP BY 查询在内存中按日期合并，区间内没有数据的日期补零
async fn daily_stats(
    pool: &PgPool,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    event_id: Option<i64>,
) -> Result<Vec<DailyStat>, sqlx::Error> {
    let registration_rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
        r#"
        SELECT created_at::date AS day, COUNT(*)
        FROM attendees
        WHERE created_at >= $1 AND ($2::bigint IS NULL OR event_id = $2)
        GROUP BY day
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    let check_in_rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
        r#"
        SELECT ci.checked_in_at::date AS day, COUNT(*)
        FROM check_ins ci
        JOIN attendees a ON a.id = ci.attendee_id
        WHERE ci.checked_in_at >= $1 AND ($2::bigint IS NULL OR a.event_id = $2)
        GROUP BY day
        "#,
    )
    .bind(start)
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    let mut by_day: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    let mut day = start.date_naive();
    while day <= now.date_naive() {
        by_day.insert(day, (0, 0));
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    for (day, count) in registration_rows {
        by_day.entry(day).or_default().0 = count;
    }
    for (day, count) in check_in_rows {
        by_day.entry(day).or_default().1 = count;
    }

    Ok(by_day
        .into_iter()
        .map(|(date, (registrations, check_ins))| DailyStat {
            date,
            registrations,
            check_ins,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_start_known_periods() {
        let now = Utc::now();
        assert_eq!(period_start("1d", now), now - Duration::days(1));
        assert_eq!(period_start("30d", now), now - Duration::days(30));
        assert_eq!(period_start("1y", now), now - Duration::days(365));
    }

    #[test]
    fn test_period_start_falls_back_to_seven_days() {
        let now = Utc::now();
        assert_eq!(period_start("bogus", now), now - Duration::days(7));
        assert_eq!(period_start("", now), now - Duration::days(7));
    }
}
