//! 签到记录实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::CheckInType;

/// 未指定操作人时的系统哨兵值
pub const DEFAULT_CHECKED_IN_BY: &str = "system";

/// 未指定签到点时的默认值
pub const DEFAULT_LOCATION: &str = "main";

/// 签到记录
///
/// 只在签到成功时创建，从不更新；随参会者删除级联删除。
/// 每个参会者每种签到类型至多一条，由存储唯一约束保证。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: i64,
    /// 参会者 ID
    pub attendee_id: i64,
    pub check_in_type: CheckInType,
    pub checked_in_at: DateTime<Utc>,
    /// 操作人（扫码员工位号或工号，系统操作为 "system"）
    pub checked_in_by: String,
    /// 签到点
    pub location: String,
    #[sqlx(default)]
    pub notes: Option<String>,
}

/// 新建签到记录的写入载荷
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub attendee_id: i64,
    pub check_in_type: CheckInType,
    pub checked_in_by: String,
    pub location: String,
    pub notes: Option<String>,
}

impl NewCheckIn {
    /// 构建写入载荷，操作人和签到点缺省时使用系统默认值
    pub fn new(
        attendee_id: i64,
        check_in_type: CheckInType,
        checked_in_by: Option<String>,
        location: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            attendee_id,
            check_in_type,
            checked_in_by: checked_in_by.unwrap_or_else(|| DEFAULT_CHECKED_IN_BY.to_string()),
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            notes,
        }
    }
}
