//! 活动仓储实现

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::{RegistrationError, Result};
use crate::models::Event;

use super::traits::EventRepositoryTrait;

const EVENT_COLUMNS: &str = "id, event_code, event_name, event_date, created_at, updated_at";

/// 活动仓储（PostgreSQL）
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn find_by_code(&self, event_code: &str) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE event_code = $1",
            EVENT_COLUMNS
        ))
        .bind(event_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list(&self, upcoming_only: bool) -> Result<Vec<Event>> {
        let sql = if upcoming_only {
            format!(
                "SELECT {} FROM events WHERE event_date >= CURRENT_DATE ORDER BY event_date ASC",
                EVENT_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM events ORDER BY event_date ASC",
                EVENT_COLUMNS
            )
        };

        let events = sqlx::query_as::<_, Event>(&sql).fetch_all(&self.pool).await?;

        Ok(events)
    }

    async fn create(
        &self,
        event_code: &str,
        event_name: &str,
        event_date: NaiveDate,
    ) -> Result<Event> {
        let result = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (event_code, event_name, event_date)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event_code)
        .bind(event_name)
        .bind(event_date)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(event) => Ok(event),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("uq_events_event_code") =>
            {
                Err(RegistrationError::DuplicateEventCode(event_code.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
