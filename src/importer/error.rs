// ==========================================
// 高校管理系统 - 导入模块错误类型
// ==========================================
// 范围: 仅结构性错误（终止整个导入运行）
// 行级错误记入 ImportOutcome，不经过此类型
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("input is empty")]
    EmptyInput,

    #[error("input has a header line but no data rows")]
    NoDataRows,

    #[error("malformed header (line {line}): unterminated quote")]
    MalformedHeader { line: usize },

    #[error("too many data rows: {rows} exceeds the limit of {max}")]
    TooManyRows { rows: usize, max: usize },

    // ===== 外部依赖错误 =====
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    // ===== 导出错误 =====
    #[error("failed to write output: {0}")]
    OutputWriteError(String),

    // ===== 通用错误 =====
    #[error("internal error: {0}")]
    InternalError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::OutputWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
