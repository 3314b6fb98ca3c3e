// ==========================================
// 高校管理系统 - 批量导入核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 学生/教师名单批量导入与逐行对账
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LineErrorKind, RecordKind};

// 领域实体
pub use domain::{
    ActorContext, CreatedEntity, Department, ImportBatch, ImportOutcome, ImportReport, ImportRow,
    LineError, StudentImportRow, TeacherImportRow,
};

// 导入器
pub use importer::{ImportError, RecordImporter, RecordImporterImpl, ReferenceIndex};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "college-import";
