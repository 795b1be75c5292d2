//! 输入清洗与格式校验
//!
//! 报名表单来自公网，落库前统一清洗：去首尾空白、去尖括号、截断超长输入。
//! 手机号校验供 validator 的 custom 校验器使用。

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// 单字段输入的最大长度
const MAX_INPUT_LEN: usize = 1000;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone regex"));

/// 清洗用户输入
///
/// 去首尾空白、移除尖括号、按字符数截断到 1000
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_INPUT_LEN)
        .collect()
}

/// 清洗可选输入，空串归一为 None
pub fn sanitize_optional(input: &Option<String>) -> Option<String> {
    input
        .as_deref()
        .map(sanitize_input)
        .filter(|s| !s.is_empty())
}

/// 手机号校验（validator custom 校验器）
///
/// 允许空格、连字符、括号作为分隔符，剥离后须为 1-16 位数字（可带 + 前缀）
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if PHONE_RE.is_match(&digits) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        assert_eq!(sanitize_input("<script>alert</script>"), "scriptalert/script");
        assert_eq!(sanitize_input("  Dr. John Smith  "), "Dr. John Smith");
    }

    #[test]
    fn test_sanitize_truncates_long_input() {
        let long = "a".repeat(2000);
        assert_eq!(sanitize_input(&long).len(), 1000);
    }

    #[test]
    fn test_sanitize_optional_normalizes_empty() {
        assert_eq!(sanitize_optional(&Some("  ".to_string())), None);
        assert_eq!(sanitize_optional(&None), None);
        assert_eq!(
            sanitize_optional(&Some(" note ".to_string())),
            Some("note".to_string())
        );
    }

    #[test]
    fn test_validate_phone_accepts_common_formats() {
        assert!(validate_phone("+15550100123").is_ok());
        assert!(validate_phone("555-010-0123").is_ok());
        assert!(validate_phone("(555) 010 0123").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_bad_input() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("abc").is_err());
        assert!(validate_phone("0123456").is_err());
        assert!(validate_phone("+123456789012345678").is_err());
    }
}
