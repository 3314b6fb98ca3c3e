// ==========================================
// 高校管理系统 - 批量导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::{ActorContext, ImportRow, ImportReport, RecordKind};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::ParsedRow;
use crate::importer::reference_resolver::ReferenceIndex;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// RecordImporter Trait
// ==========================================
// 用途: 批量导入主接口
// 实现者: RecordImporterImpl
#[async_trait]
pub trait RecordImporter: Send + Sync {
    /// 从文本内容导入
    ///
    /// # 参数
    /// - kind: 记录类型（决定列布局与必填字段）
    /// - content: 原始文本（首行为表头）
    /// - index: 院系参照索引（由调用方预先加载）
    /// - actor: 操作人
    /// - file_name: 来源文件名（仅用于批次记录）
    ///
    /// # 返回
    /// - Ok(ImportReport): 逐行结果（单行失败不会中断）
    /// - Err: 结构性错误（空文件、表头损坏、超出行数上限等）
    ///
    /// # 导入流程
    /// 1. 解析
    /// 2. 逐行: 引号检查 → 清洗 → 映射/必填 → 院系解析 → 格式校验 → 重复检测
    /// 3. 逐行: 写入
    /// 4. 汇总 + 批次记录
    async fn import_text(
        &self,
        kind: RecordKind,
        content: &str,
        index: &ReferenceIndex,
        actor: &ActorContext,
        file_name: Option<&str>,
    ) -> ImportResult<ImportReport>;

    /// 从文件导入（文件不可读为结构性错误）
    async fn import_file(
        &self,
        kind: RecordKind,
        file_path: &Path,
        index: &ReferenceIndex,
        actor: &ActorContext,
    ) -> ImportResult<ImportReport>;
}

// ==========================================
// RowParser Trait
// ==========================================
// 用途: 文本解析接口
// 实现者: DelimitedTextParser
pub trait RowParser: Send + Sync {
    /// 将原始文本解析为行（空白行已剔除，保留物理行号）
    fn parse_rows(&self, content: &str) -> Vec<ParsedRow>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 字段清洗接口
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// TRIM，保留原大小写
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 邮箱: TRIM + 转小写
    fn clean_email(&self, value: &str) -> String;

    /// 手机号: 去掉空格、'-'、'.'、括号
    fn clean_mobile(&self, value: &str) -> Option<String>;

    /// 科目列表: 以 ';' 或 ',' 拆分，去空
    fn split_subjects(&self, value: &str) -> Vec<String>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 映射后记录的格式校验
// 实现者: DqValidator
pub trait DqValidator: Send + Sync {
    /// 返回第一条违规描述；None 表示通过
    fn validate(&self, row: &ImportRow) -> Option<String>;
}
