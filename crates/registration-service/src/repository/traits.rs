//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{
    Attendee, AttendeeListFilter, AttendeeUpdate, CheckIn, CheckInType, Event, NewAttendee,
    NewCheckIn,
};

/// 活动仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn find_by_code(&self, event_code: &str) -> Result<Option<Event>>;
    /// 按活动日期升序列出；upcoming_only 时只含今天及以后的活动
    async fn list(&self, upcoming_only: bool) -> Result<Vec<Event>>;
    /// 活动码冲突映射为 DuplicateEventCode
    async fn create(&self, event_code: &str, event_name: &str, event_date: NaiveDate)
    -> Result<Event>;
}

/// 参会者仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendeeRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Attendee>>;
    async fn find_by_badge_uid(&self, badge_uid: &str) -> Result<Option<Attendee>>;
    async fn find_by_event_and_email(&self, event_id: i64, email: &str)
    -> Result<Option<Attendee>>;
    /// 插入即裁决点：badge_uid 冲突映射为 BadgeUidConflict，
    /// (event_id, email) 冲突映射为 DuplicateRegistration
    async fn create(&self, new: &NewAttendee) -> Result<Attendee>;
    /// 姓名/邮箱/胸牌号模糊搜索
    async fn search(&self, query: &str, event_id: Option<i64>, limit: i64)
    -> Result<Vec<Attendee>>;
    /// 管理端分页列表，返回 (记录, 总数)
    async fn list(&self, filter: &AttendeeListFilter) -> Result<(Vec<Attendee>, i64)>;
    /// 部分更新；记录不存在返回 None
    async fn update(&self, id: i64, update: &AttendeeUpdate) -> Result<Option<Attendee>>;
    /// 删除参会者（签到记录级联删除）；返回是否确有删除
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// 签到记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInRepositoryTrait: Send + Sync {
    async fn find_by_attendee_and_type(
        &self,
        attendee_id: i64,
        check_in_type: CheckInType,
    ) -> Result<Option<CheckIn>>;
    async fn list_by_attendee(&self, attendee_id: i64) -> Result<Vec<CheckIn>>;
    /// 批量查询多个参会者的签到记录（列表页展示签到状态）
    async fn list_by_attendees(&self, attendee_ids: &[i64]) -> Result<Vec<CheckIn>>;
    /// 原子插入：ON CONFLICT DO NOTHING，返回 None 表示该类型已有签到记录。
    /// 并发重复请求在这里裁决，之前的存在性检查只是快路径。
    async fn insert(&self, new: &NewCheckIn) -> Result<Option<CheckIn>>;
}
