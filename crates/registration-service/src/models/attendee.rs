//! 参会者实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::CheckInType;

/// 新报名默认的胸牌打印模板
pub const DEFAULT_BADGE_TEMPLATE: &str = "TPL_A6_V1";

/// 报名类别的常见取值
///
/// 类别是开放字符串，新增类别不需要迁移；此列表仅供前端下拉框使用
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "delegate",
    "faculty",
    "chairperson",
    "exhibitor",
    "staff",
    "speaker",
    "organizer",
];

/// 参会者
///
/// 胸牌号创建后不可变；邮箱存在时同一活动内唯一
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: i64,
    /// 所属活动 ID
    pub event_id: i64,
    /// 胸牌号
    pub badge_uid: String,
    pub full_name: String,
    #[sqlx(default)]
    pub email: Option<String>,
    #[sqlx(default)]
    pub phone: Option<String>,
    /// 报名类别（开放字符串）
    pub category: String,
    #[sqlx(default)]
    pub institution: Option<String>,
    /// 餐食权益
    pub meal_entitled: bool,
    /// 物料权益
    pub kit_entitled: bool,
    /// 胸牌打印模板
    #[sqlx(default)]
    pub badge_print_template: Option<String>,
    #[sqlx(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendee {
    /// 检查参会者是否具备指定签到类型的权益
    ///
    /// 普通签到无权益门槛
    pub fn is_entitled(&self, check_in_type: CheckInType) -> bool {
        match check_in_type {
            CheckInType::Meal => self.meal_entitled,
            CheckInType::Kit => self.kit_entitled,
            CheckInType::General => true,
        }
    }
}

/// 新建参会者的写入载荷
#[derive(Debug, Clone)]
pub struct NewAttendee {
    pub event_id: i64,
    pub badge_uid: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: String,
    pub institution: Option<String>,
    pub meal_entitled: bool,
    pub kit_entitled: bool,
    pub badge_print_template: Option<String>,
    pub notes: Option<String>,
}

/// 参会者部分更新
///
/// None 表示保留原值；权益开关只通过此管理端更新操作变更
#[derive(Debug, Clone, Default)]
pub struct AttendeeUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub institution: Option<String>,
    pub meal_entitled: Option<bool>,
    pub kit_entitled: Option<bool>,
    pub notes: Option<String>,
}

impl AttendeeUpdate {
    /// 是否没有任何待更新字段
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.category.is_none()
            && self.institution.is_none()
            && self.meal_entitled.is_none()
            && self.kit_entitled.is_none()
            && self.notes.is_none()
    }
}

/// 管理端参会者列表过滤条件
#[derive(Debug, Clone)]
pub struct AttendeeListFilter {
    pub event_id: Option<i64>,
    /// 对姓名/邮箱/胸牌号做模糊匹配
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for AttendeeListFilter {
    fn default() -> Self {
        Self {
            event_id: None,
            search: None,
            limit: 100,
            offset: 0,
        }
    }
}
