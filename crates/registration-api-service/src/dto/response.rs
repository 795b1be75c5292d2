//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }
}

/// 二维码载荷响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayloadDto {
    pub badge_uid: String,
    /// 喂给二维码生成器的文本
    pub payload: String,
}

/// 统计看板响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub overview: AnalyticsOverview,
    pub check_in_breakdown: CheckInBreakdown,
    /// 报名类别 -> 人数
    pub category_breakdown: HashMap<String, i64>,
    pub entitlements_breakdown: EntitlementsBreakdown,
    pub daily_stats: Vec<DailyStat>,
    pub top_events: Vec<TopEvent>,
}

/// 总量概览
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_attendees: i64,
    pub total_check_ins: i64,
    pub total_events: i64,
    pub period: String,
}

/// 按签到类型的分布
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInBreakdown {
    pub meal: i64,
    pub kit: i64,
    pub general: i64,
}

/// 按权益的分布
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementsBreakdown {
    pub meal_entitled: i64,
    pub kit_entitled: i64,
    pub both_entitled: i64,
}

/// 单日报名/签到数
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: NaiveDate,
    pub registrations: i64,
    pub check_ins: i64,
}

/// 按参会人数排序的活动
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEvent {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub attendee_count: i64,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub environment: String,
    pub services: HealthServices,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthServices {
    pub database: ServiceHealth,
    pub api: ServiceHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: &'static str,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success_shape() {
        let resp = ApiResponse::success(vec![1, 2, 3]);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"code\":\"SUCCESS\""));
        assert!(json.contains("\"data\":[1,2,3]"));
    }

    #[test]
    fn test_api_response_empty_omits_data() {
        let resp = ApiResponse::<()>::success_empty();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_analytics_dto_camel_case() {
        let dto = AnalyticsDto {
            overview: AnalyticsOverview {
                total_attendees: 150,
                total_check_ins: 90,
                total_events: 2,
                period: "7d".to_string(),
            },
            check_in_breakdown: CheckInBreakdown {
                meal: 40,
                kit: 20,
                general: 30,
            },
            category_breakdown: HashMap::new(),
            entitlements_breakdown: EntitlementsBreakdown {
                meal_entitled: 100,
                kit_entitled: 60,
                both_entitled: 50,
            },
            daily_stats: vec![],
            top_events: vec![],
        };
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"totalAttendees\":150"));
        assert!(json.contains("\"checkInBreakdown\""));
        assert!(json.contains("\"bothEntitled\":50"));
    }
}
