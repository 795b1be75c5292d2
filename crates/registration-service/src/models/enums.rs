//! 签到服务枚举类型定义
//!
//! 枚举同时支持数据库（sqlx）和 JSON（serde）序列化

use serde::{Deserialize, Serialize};

/// 签到类型
///
/// 封闭集合：餐食、物料、普通签到。餐食和物料受参会者权益开关控制。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum CheckInType {
    /// 餐食领取 - 需要 meal_entitled
    Meal,
    /// 物料领取 - 需要 kit_entitled
    Kit,
    /// 普通签到 - 无权益门槛
    General,
}

impl CheckInType {
    /// 所有签到类型
    pub const ALL: [CheckInType; 3] = [CheckInType::Meal, CheckInType::Kit, CheckInType::General];

    /// 线上格式的小写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Kit => "kit",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for CheckInType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
