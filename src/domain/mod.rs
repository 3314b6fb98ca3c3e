// ==========================================
// 高校管理系统 - 领域模型层
// ==========================================
// 职责: 定义导入相关实体与类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod department;
pub mod import;
pub mod person;
pub mod types;

// 重导出核心类型
pub use department::{department_name_key, Department};
pub use import::{ActorContext, ImportBatch, ImportOutcome, ImportReport, LineError};
pub use person::{CreatedEntity, ImportRow, StudentImportRow, TeacherImportRow};
pub use types::{LineErrorKind, RecordKind};
