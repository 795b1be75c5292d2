//! 胸牌号生成与校验
//!
//! 胸牌号格式：REG 前缀 + 毫秒时间戳的 36 进制 + 6 位 36 进制随机后缀，全大写。
//! 时间戳 + 随机后缀在突发流量下仍可能碰撞，生成器不承诺唯一，
//! 唯一性由 attendees.badge_uid 的存储约束兜底，插入冲突时重新生成。

use std::sync::LazyLock;

use chrono::Utc;
use rand::Rng;
use regex::Regex;

/// 胸牌号固定前缀
pub const BADGE_UID_PREFIX: &str = "REG";

/// 随机后缀长度
const RANDOM_SUFFIX_LEN: usize = 6;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 通用胸牌号校验规则
///
/// 胸牌号视为不透明唯一令牌，只做形状检查，不解析内部结构
static BADGE_UID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,20}$").expect("badge uid regex"));

/// 生成胸牌号
pub fn generate_badge_uid() -> String {
    let timestamp = to_base36(Utc::now().timestamp_millis());

    let mut rng = rand::rng();
    let random: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())] as char)
        .collect();

    format!("{}{}{}", BADGE_UID_PREFIX, timestamp, random).to_uppercase()
}

/// 校验字符串是否符合胸牌号形状
pub fn is_valid_badge_uid(badge_uid: &str) -> bool {
    BADGE_UID_RE.is_match(badge_uid)
}

/// 非负整数转 36 进制字符串（小写）
fn to_base36(mut n: i64) -> String {
    if n <= 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ascii")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36), "100");
    }

    #[test]
    fn test_generated_uid_shape() {
        let uid = generate_badge_uid();
        assert!(uid.starts_with(BADGE_UID_PREFIX));
        assert!(is_valid_badge_uid(&uid), "生成的胸牌号应通过形状校验: {}", uid);
        // REG + 时间戳（当前毫秒约 8-9 位）+ 6 位随机
        assert!(uid.len() >= 15 && uid.len() <= 20);
    }

    #[test]
    fn test_generated_uids_differ() {
        let uids: std::collections::HashSet<String> =
            (0..100).map(|_| generate_badge_uid()).collect();
        assert_eq!(uids.len(), 100, "同一毫秒内随机后缀也应该区分开");
    }

    #[test]
    fn test_is_valid_badge_uid_accepts_token_shape() {
        assert!(is_valid_badge_uid("REG123456789"));
        assert!(is_valid_badge_uid("ABC123"));
    }

    #[test]
    fn test_is_valid_badge_uid_rejects_bad_shapes() {
        assert!(!is_valid_badge_uid(""));
        assert!(!is_valid_badge_uid("abc123"));
        assert!(!is_valid_badge_uid("REG12"));
        assert!(!is_valid_badge_uid("REG1234567890123456789012"));
        assert!(!is_valid_badge_uid("REG-12345"));
    }
}
