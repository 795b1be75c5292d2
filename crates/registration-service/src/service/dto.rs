//! 服务层数据传输对象
//!
//! 定义服务层与外部交互使用的 DTO，与内部领域模型解耦

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Attendee, CheckIn, CheckInType};

/// 报名请求
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub event_id: i64,
    pub full_name: String,
    /// 公开报名必填；管理端现场录入可为空
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: String,
    pub institution: Option<String>,
    pub meal_entitled: bool,
    pub kit_entitled: bool,
    pub notes: Option<String>,
}

/// 报名结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub badge_uid: String,
    pub attendee_name: String,
    pub event_name: String,
}

/// 签到请求
#[derive(Debug, Clone)]
pub struct CheckInRequest {
    pub badge_uid: String,
    pub check_in_type: CheckInType,
    pub checked_in_by: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// 签到结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub attendee_name: String,
    pub check_in_type: CheckInType,
    pub checked_in_at: DateTime<Utc>,
}

/// 活动摘要（嵌在参会者档案里）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub event_code: String,
    pub event_name: String,
    pub event_date: NaiveDate,
}

/// 参会者档案
///
/// 胸牌查询返回：参会者 + 所属活动摘要 + 签到历史
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeProfile {
    #[serde(flatten)]
    pub attendee: Attendee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSummary>,
    pub check_ins: Vec<CheckIn>,
}

/// 列表/搜索结果条目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeListItem {
    #[serde(flatten)]
    pub attendee: Attendee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSummary>,
    pub check_ins: Vec<CheckIn>,
}

/// 管理端分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeListPage {
    pub items: Vec<AttendeeListItem>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}
