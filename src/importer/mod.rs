// ==========================================
// 高校管理系统 - 导入层
// ==========================================
// 职责: 学生/教师批量导入（解析、映射、院系解析、校验、逐行写入、报告）
// 支持: 逗号分隔文本（可选双引号引用）
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_importer_impl;
pub mod record_importer_trait;
pub mod reference_resolver;
pub mod report;
pub mod template;

// 重导出核心类型
pub use conflict_handler::ConflictHandler;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, RowRejection};
pub use file_parser::{read_source, DelimitedTextParser, ParsedRow};
pub use record_importer_impl::RecordImporterImpl;
pub use reference_resolver::{ReferenceIndex, UnresolvedReference};
pub use report::{render_csv_report, render_text_report, summary_line, write_report};
pub use template::{render_template, write_template};

// 重导出 Trait 接口
pub use record_importer_trait::{DataCleaner, DqValidator, RecordImporter, RowParser};
