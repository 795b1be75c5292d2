//! 查询服务
//!
//! 参会者档案、搜索、管理端分页/更新/删除，以及胸牌二维码载荷生成。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{RegistrationError, Result};
use crate::models::{
    Attendee, AttendeeListFilter, AttendeeUpdate, CheckIn, Event,
};
use crate::qr::encode_badge_payload;
use crate::repository::{
    AttendeeRepositoryTrait, CheckInRepositoryTrait, EventRepositoryTrait,
};
use crate::service::dto::{AttendeeListItem, AttendeeListPage, AttendeeProfile, EventSummary};

/// 查询服务
pub struct QueryService<ER, AR, CR>
where
    ER: EventRepositoryTrait,
    AR: AttendeeRepositoryTrait,
    CR: CheckInRepositoryTrait,
{
    event_repo: Arc<ER>,
    attendee_repo: Arc<AR>,
    check_in_repo: Arc<CR>,
}

impl<ER, AR, CR> QueryService<ER, AR, CR>
where
    ER: EventRepositoryTrait,
    AR: AttendeeRepositoryTrait,
    CR: CheckInRepositoryTrait,
{
    pub fn new(event_repo: Arc<ER>, attendee_repo: Arc<AR>, check_in_repo: Arc<CR>) -> Self {
        Self {
            event_repo,
            attendee_repo,
            check_in_repo,
        }
    }

    /// 按胸牌号查询参会者档案（含活动摘要和签到历史）
    #[instrument(skip(self))]
    pub async fn lookup_by_badge(&self, badge_uid: &str) -> Result<AttendeeProfile> {
        let attendee = self
            .attendee_repo
            .find_by_badge_uid(badge_uid)
            .await?
            .ok_or_else(|| RegistrationError::AttendeeNotFound(badge_uid.to_string()))?;

        let event = self.event_repo.find_by_id(attendee.event_id).await?;
        let check_ins = self.check_in_repo.list_by_attendee(attendee.id).await?;

        Ok(AttendeeProfile {
            event: event.as_ref().map(event_summary),
            check_ins,
            attendee,
        })
    }

    /// 生成胸牌二维码载荷（带所属活动码）
    pub async fn badge_qr_payload(&self, badge_uid: &str) -> Result<String> {
        let attendee = self
            .attendee_repo
            .find_by_badge_uid(badge_uid)
            .await?
            .ok_or_else(|| RegistrationError::AttendeeNotFound(badge_uid.to_string()))?;

        let event = self.event_repo.find_by_id(attendee.event_id).await?;

        Ok(encode_badge_payload(
            &attendee.badge_uid,
            event.as_ref().map(|e| e.event_code.as_str()),
        ))
    }

    /// 姓名/邮箱/胸牌号模糊搜索
    pub async fn search_attendees(
        &self,
        query: &str,
        event_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<AttendeeListItem>> {
        let attendees = self.attendee_repo.search(query, event_id, limit).await?;
        self.assemble_items(attendees).await
    }

    /// 管理端分页列表
    pub async fn list_attendees(&self, filter: &AttendeeListFilter) -> Result<AttendeeListPage> {
        let (attendees, total) = self.attendee_repo.list(filter).await?;
        let items = self.assemble_items(attendees).await?;

        Ok(AttendeeListPage {
            items,
            total,
            limit: filter.limit,
            offset: filter.offset,
            has_more: total > filter.offset + filter.limit,
        })
    }

    /// 管理端部分更新（权益开关只能走这里变更）
    #[instrument(skip(self, update))]
    pub async fn update_attendee(&self, id: i64, update: &AttendeeUpdate) -> Result<Attendee> {
        if update.is_empty() {
            return Err(RegistrationError::Validation(
                "没有待更新字段".to_string(),
            ));
        }

        let attendee = self
            .attendee_repo
            .update(id, update)
            .await?
            .ok_or_else(|| RegistrationError::AttendeeNotFound(id.to_string()))?;

        info!(badge_uid = %attendee.badge_uid, "Attendee updated");
        Ok(attendee)
    }

    /// 管理端删除（签到记录级联删除）
    #[instrument(skip(self))]
    pub async fn delete_attendee(&self, id: i64) -> Result<()> {
        let deleted = self.attendee_repo.delete(id).await?;
        if !deleted {
            return Err(RegistrationError::AttendeeNotFound(id.to_string()));
        }

        info!(attendee_id = id, "Attendee deleted");
        Ok(())
    }

    /// 为一批参会者装配活动摘要与签到记录
    async fn assemble_items(&self, attendees: Vec<Attendee>) -> Result<Vec<AttendeeListItem>> {
        let attendee_ids: Vec<i64> = attendees.iter().map(|a| a.id).collect();
        let mut check_ins_by_attendee: HashMap<i64, Vec<CheckIn>> = HashMap::new();
        for check_in in self.check_in_repo.list_by_attendees(&attendee_ids).await? {
            check_ins_by_attendee
                .entry(check_in.attendee_id)
                .or_default()
                .push(check_in);
        }

        // 同一次列表通常只涉及少数几个活动，按去重后的 ID 逐个取
        let mut events_by_id: HashMap<i64, Event> = HashMap::new();
        for event_id in attendees.iter().map(|a| a.event_id) {
            if !events_by_id.contains_key(&event_id) {
                if let Some(event) = self.event_repo.find_by_id(event_id).await? {
                    events_by_id.insert(event_id, event);
                }
            }
        }

        Ok(attendees
            .into_iter()
            .map(|attendee| AttendeeListItem {
                event: events_by_id.get(&attendee.event_id).map(event_summary),
                check_ins: check_ins_by_attendee
                    .remove(&attendee.id)
                    .unwrap_or_default(),
                attendee,
            })
            .collect())
    }
}

fn event_summary(event: &Event) -> EventSummary {
    EventSummary {
        event_code: event.event_code.clone(),
        event_name: event.event_name.clone(),
        event_date: event.event_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckInType;
    use crate::qr::decode_badge_payload;
    use crate::repository::{
        MockAttendeeRepositoryTrait, MockCheckInRepositoryTrait, MockEventRepositoryTrait,
    };
    use chrono::{NaiveDate, Utc};

    fn test_event(id: i64) -> Event {
        Event {
            id,
            event_code: "CONF2026".to_string(),
            event_name: "Annual Conference".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_attendee(id: i64) -> Attendee {
        Attendee {
            id,
            event_id: 1,
            badge_uid: format!("REGTEST{:05}", id),
            full_name: "Dr. John Smith".to_string(),
            email: Some("john@example.com".to_string()),
            phone: None,
            category: "delegate".to_string(),
            institution: None,
            meal_entitled: true,
            kit_entitled: false,
            badge_print_template: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_check_in(attendee_id: i64, t: CheckInType) -> CheckIn {
        CheckIn {
            id: attendee_id * 10,
            attendee_id,
            check_in_type: t,
            checked_in_at: Utc::now(),
            checked_in_by: "system".to_string(),
            location: "main".to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_lookup_unknown_badge() {
        let event_repo = MockEventRepositoryTrait::new();
        let mut attendee_repo = MockAttendeeRepositoryTrait::new();
        attendee_repo
            .expect_find_by_badge_uid()
            .returning(|_| Ok(None));
        let check_in_repo = MockCheckInRepositoryTrait::new();

        let service = QueryService::new(
            Arc::new(event_repo),
            Arc::new(attendee_repo),
            Arc::new(check_in_repo),
        );
        let err = service.lookup_by_badge("REGMISSING1").await.unwrap_err();

        assert!(matches!(err, RegistrationError::AttendeeNotFound(_)));
    }

    #[tokio::test]
    async fn test_lookup_assembles_profile() {
        let mut event_repo = MockEventRepositoryTrait::new();
        event_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_event(id))));

        let mut attendee_repo = MockAttendeeRepositoryTrait::new();
        attendee_repo
            .expect_find_by_badge_uid()
            .returning(|_| Ok(Some(test_attendee(7))));

        let mut check_in_repo = MockCheckInRepositoryTrait::new();
        check_in_repo
            .expect_list_by_attendee()
            .returning(|id| Ok(vec![test_check_in(id, CheckInType::Meal)]));

        let service = QueryService::new(
            Arc::new(event_repo),
            Arc::new(attendee_repo),
            Arc::new(check_in_repo),
        );
        let profile = service.lookup_by_badge("REGTEST00007").await.unwrap();

        assert_eq!(profile.attendee.id, 7);
        assert_eq!(
            profile.event.as_ref().map(|e| e.event_name.as_str()),
            Some("Annual Conference")
        );
        assert_eq!(profile.check_ins.len(), 1);
    }

    #[tokio::test]
    async fn test_badge_qr_payload_embeds_event_code() {
        let mut event_repo = MockEventRepositoryTrait::new();
        event_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_event(id))));

        let mut attendee_repo = MockAttendeeRepositoryTrait::new();
        attendee_repo
            .expect_find_by_badge_uid()
            .returning(|_| Ok(Some(test_attendee(7))));

        let check_in_repo = MockCheckInRepositoryTrait::new();

        let service = QueryService::new(
            Arc::new(event_repo),
            Arc::new(attendee_repo),
            Arc::new(check_in_repo),
        );
        let payload = service.badge_qr_payload("REGTEST00007").await.unwrap();

        let decoded = decode_badge_payload(&payload).expect("载荷应可解码");
        assert_eq!(decoded.badge_uid, "REGTEST00007");
        assert_eq!(decoded.event_code.as_deref(), Some("CONF2026"));
    }

    #[tokio::test]
    async fn test_list_attendees_pagination_flags() {
        let mut event_repo = MockEventRepositoryTrait::new();
        event_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_event(id))));

        let mut attendee_repo = MockAttendeeRepositoryTrait::new();
        attendee_repo
            .expect_list()
            .returning(|_| Ok((vec![test_attendee(1), test_attendee(2)], 10)));

        let mut check_in_repo = MockCheckInRepositoryTrait::new();
        check_in_repo
            .expect_list_by_attendees()
            .returning(|ids| Ok(ids.iter().map(|id| test_check_in(*id, CheckInType::General)).collect()));

        let service = QueryService::new(
            Arc::new(event_repo),
            Arc::new(attendee_repo),
            Arc::new(check_in_repo),
        );
        let page = service
            .list_attendees(&AttendeeListFilter {
                limit: 2,
                offset: 0,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 10);
        assert!(page.has_more);
        assert_eq!(page.items[0].check_ins.len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_empty_payload() {
        let event_repo = MockEventRepositoryTrait::new();
        let attendee_repo = MockAttendeeRepositoryTrait::new();
        let check_in_repo = MockCheckInRepositoryTrait::new();

        let service = QueryService::new(
            Arc::new(event_repo),
            Arc::new(attendee_repo),
            Arc::new(check_in_repo),
        );
        let err = service
            .update_attendee(1, &AttendeeUpdate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_attendee() {
        let event_repo = MockEventRepositoryTrait::new();
        let mut attendee_repo = MockAttendeeRepositoryTrait::new();
        attendee_repo.expect_delete().returning(|_| Ok(false));
        let check_in_repo = MockCheckInRepositoryTrait::new();

        let service = QueryService::new(
            Arc::new(event_repo),
            Arc::new(attendee_repo),
            Arc::new(check_in_repo),
        );
        let err = service.delete_attendee(99).await.unwrap_err();

        assert!(matches!(err, RegistrationError::AttendeeNotFound(_)));
    }
}
