//! 胸牌二维码载荷编解码
//!
//! 载荷是自描述的 JSON 文本，编码端写入胸牌号、可选活动码、时间戳和版本号。
//! 解码端处理的是摄像头扫出来的任意字符串，属于不可信输入：
//! 解析失败、类型不符、缺少胸牌号都按"无效载荷"处理，不是异常路径。

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// 载荷类型标识
pub const PAYLOAD_TYPE: &str = "badge";

/// 载荷格式版本
pub const PAYLOAD_VERSION: &str = "1.0";

/// 胸牌二维码载荷
///
/// timestamp / version 允许缺省，兼容早期打印的胸牌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgePayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub badge_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,
    /// 编码时刻，毫秒时间戳
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub version: String,
}

/// 编码胸牌二维码载荷
///
/// 不会失败：载荷只包含字符串和整数字段，活动码缺省时整个字段省略
pub fn encode_badge_payload(badge_uid: &str, event_code: Option<&str>) -> String {
    let mut payload = Map::new();
    payload.insert("type".to_string(), json!(PAYLOAD_TYPE));
    payload.insert("badge_uid".to_string(), json!(badge_uid));
    if let Some(code) = event_code {
        payload.insert("event_code".to_string(), json!(code));
    }
    payload.insert("timestamp".to_string(), json!(Utc::now().timestamp_millis()));
    payload.insert("version".to_string(), json!(PAYLOAD_VERSION));

    Value::Object(payload).to_string()
}

/// 解码胸牌二维码载荷
///
/// 返回 None 的情况：JSON 解析失败、不是对象、type 不为 "badge"、
/// badge_uid 缺失或为空。其余字段原样带回。
pub fn decode_badge_payload(raw: &str) -> Option<BadgePayload> {
    let payload: BadgePayload = serde_json::from_str(raw).ok()?;

    if payload.payload_type != PAYLOAD_TYPE || payload.badge_uid.is_empty() {
        return None;
    }

    Some(payload)
}

/// 载荷是否有效
pub fn is_valid_payload(raw: &str) -> bool {
    decode_badge_payload(raw).is_some()
}
