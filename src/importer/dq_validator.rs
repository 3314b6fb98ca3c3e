// ==========================================
// 高校管理系统 - 数据质量校验器实现
// ==========================================
// 职责: 映射后记录的格式校验（邮箱、手机号）
// ==========================================

use crate::domain::ImportRow;
use crate::importer::record_importer_trait::DqValidator as DqValidatorTrait;

pub const DEFAULT_MOBILE_MIN_DIGITS: usize = 7;
pub const DEFAULT_MOBILE_MAX_DIGITS: usize = 15;

pub struct DqValidator {
    mobile_min_digits: usize,
    mobile_max_digits: usize,
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MOBILE_MIN_DIGITS, DEFAULT_MOBILE_MAX_DIGITS)
    }
}

impl DqValidator {
    pub fn new(mobile_min_digits: usize, mobile_max_digits: usize) -> Self {
        Self {
            mobile_min_digits,
            mobile_max_digits,
        }
    }

    /// local@domain，domain 含 '.' 且两端非空
    fn check_email(&self, email: &str) -> Option<String> {
        let invalid = || Some(format!("invalid Email: {}", email));

        if email.chars().any(char::is_whitespace) {
            return invalid();
        }
        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return invalid();
        };
        if local.is_empty() || domain.starts_with('.') || domain.ends_with('.') {
            return invalid();
        }
        if !domain.contains('.') {
            return invalid();
        }
        None
    }

    /// 可选 '+' 前缀 + 指定位数的数字
    fn check_mobile(&self, mobile: &str) -> Option<String> {
        let digits = mobile.strip_prefix('+').unwrap_or(mobile);
        let valid = digits.chars().all(|c| c.is_ascii_digit())
            && (self.mobile_min_digits..=self.mobile_max_digits).contains(&digits.len());
        if valid {
            None
        } else {
            Some(format!(
                "invalid Mobile: {} (expected {}-{} digits)",
                mobile, self.mobile_min_digits, self.mobile_max_digits
            ))
        }
    }
}

impl DqValidatorTrait for DqValidator {
    fn validate(&self, row: &ImportRow) -> Option<String> {
        if let Some(violation) = self.check_email(row.email()) {
            return Some(violation);
        }
        row.mobile().and_then(|m| self.check_mobile(m))
    }
}
