//! 签到记录仓储实现

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::{CheckIn, CheckInType, NewCheckIn};

use super::traits::CheckInRepositoryTrait;

const CHECK_IN_COLUMNS: &str =
    "id, attendee_id, check_in_type, checked_in_at, checked_in_by, location, notes";

/// 签到记录仓储（PostgreSQL）
pub struct CheckInRepository {
    pool: PgPool,
}

impl CheckInRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckInRepositoryTrait for CheckInRepository {
    async fn find_by_attendee_and_type(
        &self,
        attendee_id: i64,
        check_in_type: CheckInType,
    ) -> Result<Option<CheckIn>> {
        let check_in = sqlx::query_as::<_, CheckIn>(&format!(
            "SELECT {} FROM check_ins WHERE attendee_id = $1 AND check_in_type = $2",
            CHECK_IN_COLUMNS
        ))
        .bind(attendee_id)
        .bind(check_in_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(check_in)
    }

    async fn list_by_attendee(&self, attendee_id: i64) -> Result<Vec<CheckIn>> {
        let check_ins = sqlx::query_as::<_, CheckIn>(&format!(
            "SELECT {} FROM check_ins WHERE attendee_id = $1 ORDER BY checked_in_at ASC",
            CHECK_IN_COLUMNS
        ))
        .bind(attendee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(check_ins)
    }

    async fn list_by_attendees(&self, attendee_ids: &[i64]) -> Result<Vec<CheckIn>> {
        if attendee_ids.is_empty() {
            return Ok(Vec::new());
        }

        let check_ins = sqlx::query_as::<_, CheckIn>(&format!(
            "SELECT {} FROM check_ins WHERE attendee_id = ANY($1) ORDER BY checked_in_at ASC",
            CHECK_IN_COLUMNS
        ))
        .bind(attendee_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(check_ins)
    }

    async fn insert(&self, new: &NewCheckIn) -> Result<Option<CheckIn>> {
        // 唯一约束 uq_check_ins_attendee_type 是并发裁决点：
        // 同一 (参会者, 类型) 的并发插入只有一个返回行，其余拿到 None
        let check_in = sqlx::query_as::<_, CheckIn>(&format!(
            r#"
            INSERT INTO check_ins (attendee_id, check_in_type, checked_in_by, location, notes)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (attendee_id, check_in_type) DO NOTHING
            RETURNING {}
            "#,
            CHECK_IN_COLUMNS
        ))
        .bind(new.attendee_id)
        .bind(new.check_in_type)
        .bind(&new.checked_in_by)
        .bind(&new.location)
        .bind(&new.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(check_in)
    }
}
