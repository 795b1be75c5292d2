//! 参会者仓储实现

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{RegistrationError, Result};
use crate::models::{Attendee, AttendeeListFilter, AttendeeUpdate, NewAttendee};

use super::traits::AttendeeRepositoryTrait;

const ATTENDEE_COLUMNS: &str = "id, event_id, badge_uid, full_name, email, phone, category, \
     institution, meal_entitled, kit_entitled, badge_print_template, notes, created_at, updated_at";

/// 参会者仓储（PostgreSQL）
pub struct AttendeeRepository {
    pool: PgPool,
}

impl AttendeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendeeRepositoryTrait for AttendeeRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Attendee>> {
        let attendee = sqlx::query_as::<_, Attendee>(&format!(
            "SELECT {} FROM attendees WHERE id = $1",
            ATTENDEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    async fn find_by_badge_uid(&self, badge_uid: &str) -> Result<Option<Attendee>> {
        let attendee = sqlx::query_as::<_, Attendee>(&format!(
            "SELECT {} FROM attendees WHERE badge_uid = $1",
            ATTENDEE_COLUMNS
        ))
        .bind(badge_uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    async fn find_by_event_and_email(
        &self,
        event_id: i64,
        email: &str,
    ) -> Result<Option<Attendee>> {
        let attendee = sqlx::query_as::<_, Attendee>(&format!(
            "SELECT {} FROM attendees WHERE event_id = $1 AND email = $2",
            ATTENDEE_COLUMNS
        ))
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    async fn create(&self, new: &NewAttendee) -> Result<Attendee> {
        let result = sqlx::query_as::<_, Attendee>(&format!(
            r#"
            INSERT INTO attendees (event_id, badge_uid, full_name, email, phone, category,
                                   institution, meal_entitled, kit_entitled,
                                   badge_print_template, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            ATTENDEE_COLUMNS
        ))
        .bind(new.event_id)
        .bind(&new.badge_uid)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.category)
        .bind(&new.institution)
        .bind(new.meal_entitled)
        .bind(new.kit_entitled)
        .bind(&new.badge_print_template)
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(attendee) => Ok(attendee),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("uq_attendees_badge_uid") =>
            {
                Err(RegistrationError::BadgeUidConflict(new.badge_uid.clone()))
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("uq_attendees_event_email") =>
            {
                Err(RegistrationError::DuplicateRegistration {
                    event_id: new.event_id,
                    email: new.email.clone().unwrap_or_default(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn search(
        &self,
        query: &str,
        event_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Attendee>> {
        let pattern = format!("%{}%", query);

        let attendees = if let Some(event_id) = event_id {
            sqlx::query_as::<_, Attendee>(&format!(
                r#"
                SELECT {} FROM attendees
                WHERE event_id = $1
                  AND (full_name ILIKE $2 OR email ILIKE $2 OR badge_uid ILIKE $2)
                ORDER BY created_at DESC
                LIMIT $3
                "#,
                ATTENDEE_COLUMNS
            ))
            .bind(event_id)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Attendee>(&format!(
                r#"
                SELECT {} FROM attendees
                WHERE full_name ILIKE $1 OR email ILIKE $1 OR badge_uid ILIKE $1
                ORDER BY created_at DESC
                LIMIT $2
                "#,
                ATTENDEE_COLUMNS
            ))
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(attendees)
    }

    async fn list(&self, filter: &AttendeeListFilter) -> Result<(Vec<Attendee>, i64)> {
        // event_id / search 条件拼接，绑定参数编号随条件顺延
        let mut conditions = Vec::new();
        if filter.event_id.is_some() {
            conditions.push(format!("event_id = ${}", conditions.len() + 1));
        }
        if filter.search.is_some() {
            let n = conditions.len() + 1;
            conditions.push(format!(
                "(full_name ILIKE ${n} OR email ILIKE ${n} OR badge_uid ILIKE ${n})"
            ));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) FROM attendees {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(event_id) = filter.event_id {
            count_query = count_query.bind(event_id);
        }
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let page_sql = format!(
            "SELECT {} FROM attendees {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            ATTENDEE_COLUMNS, where_clause, filter.limit, filter.offset
        );
        let mut page_query = sqlx::query_as::<_, Attendee>(&page_sql);
        if let Some(event_id) = filter.event_id {
            page_query = page_query.bind(event_id);
        }
        if let Some(pattern) = &pattern {
            page_query = page_query.bind(pattern);
        }
        let attendees = page_query.fetch_all(&self.pool).await?;

        Ok((attendees, total))
    }

    async fn update(&self, id: i64, update: &AttendeeUpdate) -> Result<Option<Attendee>> {
        let result = sqlx::query_as::<_, Attendee>(&format!(
            r#"
            UPDATE attendees SET
                full_name     = COALESCE($2, full_name),
                email         = COALESCE($3, email),
                phone         = COALESCE($4, phone),
                category      = COALESCE($5, category),
                institution   = COALESCE($6, institution),
                meal_entitled = COALESCE($7, meal_entitled),
                kit_entitled  = COALESCE($8, kit_entitled),
                notes         = COALESCE($9, notes),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ATTENDEE_COLUMNS
        ))
        .bind(id)
        .bind(&update.full_name)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.category)
        .bind(&update.institution)
        .bind(update.meal_entitled)
        .bind(update.kit_entitled)
        .bind(&update.notes)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(attendee) => Ok(attendee),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("uq_attendees_event_email") =>
            {
                // 只在冲突路径回查一次，拿到所属活动用于错误信息
                let event_id = self
                    .find_by_id(id)
                    .await?
                    .map(|a| a.event_id)
                    .unwrap_or_default();
                Err(RegistrationError::DuplicateRegistration {
                    event_id,
                    email: update.email.clone().unwrap_or_default(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attendees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
