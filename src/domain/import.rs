// ==========================================
// 高校管理系统 - 导入结果领域模型
// ==========================================
// 职责: 行级错误、导入结果累加器、批次记录、操作人上下文
// ==========================================

use crate::domain::types::{LineErrorKind, RecordKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ActorContext - 操作人
// ==========================================
// 由调用方显式传入，不从任何全局状态读取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    pub user_id: String,
    pub display_name: Option<String>,
}

impl ActorContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    /// 命令行等无登录场景使用
    pub fn system() -> Self {
        Self::new("system")
    }
}

// ==========================================
// LineError - 行级错误
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    pub line_number: usize, // 1-based，表头为第 1 行
    pub kind: LineErrorKind,
    pub message: String,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}

// ==========================================
// ImportOutcome - 导入结果累加器
// ==========================================
// 不变量: success_count + errors.len() == 已处理数据行数
// 只追加，运行期间不重置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    success_count: usize,
    errors: Vec<LineError>,
}

impl ImportOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_error(&mut self, error: LineError) {
        self.errors.push(error);
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 已处理记录数（成功 + 失败）
    pub fn processed(&self) -> usize {
        self.success_count + self.errors.len()
    }

    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 按文件顺序输出 "line N: message"
    pub fn report_lines(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// 按错误分类计数
    pub fn count_by_kind(&self, kind: LineErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }
}

// ==========================================
// ImportBatch - 导入批次记录
// ==========================================
// 对齐: import_batch 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,
    pub record_kind: RecordKind,
    pub file_name: Option<String>,
    pub total_rows: i32,
    pub success_rows: i32,
    pub failed_rows: i32,
    pub imported_by: String,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub report_json: Option<String>,
}

// ==========================================
// ImportReport - 一次导入运行的完整返回
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch: ImportBatch,
    pub outcome: ImportOutcome,
}

impl ImportReport {
    pub fn batch_id(&self) -> &str {
        &self.batch.batch_id
    }

    pub fn success_count(&self) -> usize {
        self.outcome.success_count()
    }

    pub fn error_count(&self) -> usize {
        self.outcome.error_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accumulates_in_order() {
        let mut outcome = ImportOutcome::new();
        outcome.record_success();
        outcome.record_error(LineError {
            line_number: 3,
            kind: LineErrorKind::Validation,
            message: "missing required field: Department".to_string(),
        });
        outcome.record_error(LineError {
            line_number: 5,
            kind: LineErrorKind::Resolution,
            message: "department not found: Physcs".to_string(),
        });

        assert_eq!(outcome.success_count(), 1);
        assert_eq!(outcome.error_count(), 2);
        assert_eq!(outcome.processed(), 3);
        assert_eq!(
            outcome.report_lines(),
            vec![
                "line 3: missing required field: Department".to_string(),
                "line 5: department not found: Physcs".to_string(),
            ]
        );
        assert_eq!(outcome.count_by_kind(LineErrorKind::Resolution), 1);
    }

    #[test]
    fn test_actor_system() {
        let actor = ActorContext::system();
        assert_eq!(actor.user_id, "system");
        assert!(actor.display_name.is_none());
    }
}
