//! 活动服务
//!
//! 活动的创建与列表。活动被参会者引用后不再变更，不提供删除。

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::error::{RegistrationError, Result};
use crate::models::Event;
use crate::repository::EventRepositoryTrait;

/// 活动服务
pub struct EventService<ER>
where
    ER: EventRepositoryTrait,
{
    event_repo: Arc<ER>,
}

impl<ER> EventService<ER>
where
    ER: EventRepositoryTrait,
{
    pub fn new(event_repo: Arc<ER>) -> Self {
        Self { event_repo }
    }

    /// 创建活动
    ///
    /// 活动码预检只是快路径，唯一约束在插入时兜底
    #[instrument(skip(self))]
    pub async fn create_event(
        &self,
        event_code: &str,
        event_name: &str,
        event_date: NaiveDate,
    ) -> Result<Event> {
        if self.event_repo.find_by_code(event_code).await?.is_some() {
            return Err(RegistrationError::DuplicateEventCode(event_code.to_string()));
        }

        let event = self
            .event_repo
            .create(event_code, event_name, event_date)
            .await?;

        info!(event_id = event.id, event_code = %event.event_code, "Event created");
        Ok(event)
    }

    /// 列出活动（按日期升序；upcoming_only 时只含今天及以后的）
    pub async fn list_events(&self, upcoming_only: bool) -> Result<Vec<Event>> {
        self.event_repo.list(upcoming_only).await
    }
}
