//! 请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构

use serde::Deserialize;
use validator::Validate;

use registration::models::CheckInType;

use crate::validation::validate_phone;

/// 公开报名请求
///
/// 公开表单要求邮箱/手机号/机构必填；现场录入走管理端创建接口
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub event_id: i64,
    #[validate(length(min = 2, max = 255, message = "姓名长度必须在2-255个字符之间"))]
    pub full_name: String,
    #[validate(email(message = "邮箱格式无效"), length(max = 254, message = "邮箱过长"))]
    pub email: String,
    #[validate(
        length(min = 10, max = 20, message = "手机号长度必须在10-20个字符之间"),
        custom(function = validate_phone, message = "手机号格式无效")
    )]
    pub phone: String,
    #[validate(length(min = 1, message = "必须选择报名类别"))]
    pub category: String,
    #[validate(length(min = 2, max = 255, message = "机构名称长度必须在2-255个字符之间"))]
    pub institution: String,
    pub meal_entitled: bool,
    pub kit_entitled: bool,
    #[validate(length(max = 1000, message = "备注不超过1000字符"))]
    pub notes: Option<String>,
}

/// 管理端创建参会者请求
///
/// 现场录入允许缺省邮箱/手机号/机构
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendeeRequest {
    pub event_id: i64,
    #[validate(length(min = 2, max = 255, message = "姓名长度必须在2-255个字符之间"))]
    pub full_name: String,
    #[validate(email(message = "邮箱格式无效"), length(max = 254, message = "邮箱过长"))]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "手机号过长"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "必须选择报名类别"))]
    pub category: String,
    #[validate(length(max = 255, message = "机构名称过长"))]
    pub institution: Option<String>,
    pub meal_entitled: bool,
    pub kit_entitled: bool,
    #[validate(length(max = 1000, message = "备注不超过1000字符"))]
    pub notes: Option<String>,
}

/// 签到请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckInApiRequest {
    #[validate(length(min = 1, message = "胸牌号不能为空"))]
    pub badge_uid: String,
    pub check_in_type: CheckInType,
    pub location: Option<String>,
    #[validate(length(max = 1000, message = "备注不超过1000字符"))]
    pub notes: Option<String>,
    /// 操作人，缺省由服务端填充系统哨兵值
    pub checked_in_by: Option<String>,
}

/// 扫码载荷解码请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[validate(length(min = 1, message = "扫码内容不能为空"))]
    pub payload: String,
}

/// 创建活动请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 2, max = 50, message = "活动码长度必须在2-50个字符之间"))]
    pub event_code: String,
    #[validate(length(min = 2, max = 255, message = "活动名称长度必须在2-255个字符之间"))]
    pub event_name: String,
    pub event_date: chrono::NaiveDate,
}

/// 管理端更新参会者请求（部分更新，缺省字段保持原值）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendeeRequest {
    #[validate(length(min = 2, max = 255, message = "姓名长度必须在2-255个字符之间"))]
    pub full_name: Option<String>,
    #[validate(email(message = "邮箱格式无效"), length(max = 254, message = "邮箱过长"))]
    pub email: Option<String>,
    #[validate(length(min = 10, max = 20, message = "手机号长度必须在10-20个字符之间"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "类别不能为空"))]
    pub category: Option<String>,
    #[validate(length(min = 2, max = 255, message = "机构名称长度必须在2-255个字符之间"))]
    pub institution: Option<String>,
    pub meal_entitled: Option<bool>,
    pub kit_entitled: Option<bool>,
    #[validate(length(max = 1000, message = "备注不超过1000字符"))]
    pub notes: Option<String>,
}

/// 胸牌档案查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQuery {
    pub badge_uid: String,
}

/// 参会者搜索参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    pub event_id: Option<i64>,
    pub limit: Option<i64>,
}

/// 活动列表参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    /// 仅返回今天及以后的活动
    pub active: Option<bool>,
}

/// 管理端参会者列表参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListQuery {
    pub event_id: Option<i64>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 统计看板参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub event_id: Option<i64>,
    /// 统计周期：1d / 7d / 30d / 90d / 1y，缺省 7d
    pub period: Option<String>,
}

/// CSV 导出参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub event_id: Option<i64>,
}
