//! 活动实体定义

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 活动
///
/// 活动码全局唯一，被参会者引用后不再变更（不建模删除）
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    /// 活动码，人工指定，打印在胸牌二维码里用于现场核对
    pub event_code: String,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// 活动日期是否不早于给定日期（列表页“仅显示进行中/未开始”过滤）
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.event_date >= today
    }
}
