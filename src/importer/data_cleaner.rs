// ==========================================
// 高校管理系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 邮箱小写 / 手机号去分隔符 / 科目拆分
// ==========================================

use crate::importer::record_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn clean_email(&self, value: &str) -> String {
        value.trim().to_lowercase()
    }

    fn clean_mobile(&self, value: &str) -> Option<String> {
        let cleaned: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
            .collect();
        self.normalize_null(Some(cleaned))
    }

    fn split_subjects(&self, value: &str) -> Vec<String> {
        value
            .split(|c| c == ';' || c == ',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
