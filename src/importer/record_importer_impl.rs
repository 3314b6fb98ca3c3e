// ==========================================
// 高校管理系统 - 批量导入器实现
// ==========================================
// 职责: 整合导入流程，从文本到外部写入
// 流程: 解析 → (逐行) 引号检查 → 映射/必填 → 院系解析 → 格式校验
//       → 重复检测 → 写入 → 汇总 → 批次记录
// 约束:
// - 逐行顺序处理，写入是唯一的挂起点
// - 单行失败只记入结果，不中断本次运行；已写入的行不回滚
// - 仅结构性错误返回 Err
// ==========================================

use crate::config::ImportSettings;
use crate::domain::{
    ActorContext, CreatedEntity, ImportBatch, ImportOutcome, ImportReport, ImportRow, LineError,
    LineErrorKind, RecordKind,
};
use crate::importer::conflict_handler::ConflictHandler;
use crate::importer::dq_validator::DqValidator as DefaultDqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, RowRejection};
use crate::importer::file_parser::{read_source, DelimitedTextParser, ParsedRow};
use crate::importer::record_importer_trait::{DqValidator, RecordImporter, RowParser};
use crate::importer::reference_resolver::ReferenceIndex;
use crate::repository::EntityStore;
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RecordImporterImpl - 批量导入器实现
// ==========================================
pub struct RecordImporterImpl<S>
where
    S: EntityStore,
{
    // 外部写入端
    store: S,

    // 本次运行的配置快照
    settings: ImportSettings,

    // 导入组件
    row_parser: Box<dyn RowParser>,
    field_mapper: FieldMapper,
    dq_validator: Box<dyn DqValidator>,
}

impl<S> RecordImporterImpl<S>
where
    S: EntityStore,
{
    /// 创建新的 RecordImporter 实例
    pub fn new(
        store: S,
        settings: ImportSettings,
        row_parser: Box<dyn RowParser>,
        field_mapper: FieldMapper,
        dq_validator: Box<dyn DqValidator>,
    ) -> Self {
        Self {
            store,
            settings,
            row_parser,
            field_mapper,
            dq_validator,
        }
    }

    /// 使用默认组件创建
    pub fn with_defaults(store: S, settings: ImportSettings) -> Self {
        Self::new(
            store,
            settings,
            Box::new(DelimitedTextParser::default()),
            FieldMapper::default(),
            Box::new(DefaultDqValidator::default()),
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }
}

#[async_trait]
impl<S> RecordImporter for RecordImporterImpl<S>
where
    S: EntityStore,
{
    #[instrument(skip(self, content, index, actor), fields(kind = %kind, actor = %actor.user_id))]
    async fn import_text(
        &self,
        kind: RecordKind,
        content: &str,
        index: &ReferenceIndex,
        actor: &ActorContext,
        file_name: Option<&str>,
    ) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, file_name = ?file_name, "开始批量导入");

        // === 步骤 1: 解析 ===
        debug!("步骤 1: 解析文本");
        let mut rows = self.row_parser.parse_rows(content).into_iter();

        let header = rows.next().ok_or_else(|| {
            error!("输入为空");
            ImportError::EmptyInput
        })?;
        if header.unterminated_quote {
            error!(line = header.line_number, "表头引号未闭合");
            return Err(ImportError::MalformedHeader {
                line: header.line_number,
            });
        }
        self.check_header(kind, &header);

        let data_rows: Vec<ParsedRow> = rows.collect();
        if data_rows.is_empty() {
            error!("没有数据行");
            return Err(ImportError::NoDataRows);
        }
        if data_rows.len() > self.settings.max_rows {
            error!(rows = data_rows.len(), max = self.settings.max_rows, "超出行数上限");
            return Err(ImportError::TooManyRows {
                rows: data_rows.len(),
                max: self.settings.max_rows,
            });
        }
        info!(total_rows = data_rows.len(), reference_entries = index.len(), "解析完成");

        // === 步骤 2: 已注册邮箱（跨批次重复检测）===
        let registered = self.store.registered_emails(kind).await?;
        let mut conflict_handler = ConflictHandler::new(registered);

        // === 步骤 3: 逐行校验/解析/写入 ===
        debug!("步骤 3: 逐行处理");
        let mut outcome = ImportOutcome::new();
        for row in &data_rows {
            match self
                .process_row(kind, row, index, actor, &mut conflict_handler)
                .await
            {
                Ok(created) => {
                    debug!(line = row.line_number, entity_id = %created.entity_id, "写入成功");
                    outcome.record_success();
                }
                Err(rejection) => {
                    warn!(
                        line = row.line_number,
                        kind = %rejection.kind,
                        reason = %rejection.message,
                        "行被拒绝"
                    );
                    outcome.record_error(LineError {
                        line_number: row.line_number,
                        kind: rejection.kind,
                        message: rejection.message,
                    });
                }
            }
        }

        // === 步骤 4: 汇总 + 批次记录 ===
        let elapsed_time = start_time.elapsed();
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            record_kind: kind,
            file_name: file_name.map(str::to_string),
            total_rows: data_rows.len() as i32,
            success_rows: outcome.success_count() as i32,
            failed_rows: outcome.error_count() as i32,
            imported_by: actor.user_id.clone(),
            imported_at: Utc::now(),
            elapsed_ms: elapsed_time.as_millis() as i64,
            report_json: serde_json::to_string(&outcome).ok(),
        };

        if let Err(e) = self.store.insert_batch(&batch).await {
            // 批次记录失败不影响导入结果
            warn!(batch_id = %batch_id, error = %e, "批次记录写入失败");
        }

        info!(
            batch_id = %batch_id,
            total = data_rows.len(),
            success = outcome.success_count(),
            failed = outcome.error_count(),
            elapsed_ms = elapsed_time.as_millis(),
            "批量导入完成"
        );

        Ok(ImportReport { batch, outcome })
    }

    async fn import_file(
        &self,
        kind: RecordKind,
        file_path: &Path,
        index: &ReferenceIndex,
        actor: &ActorContext,
    ) -> ImportResult<ImportReport> {
        let content = read_source(file_path).map_err(|e| {
            error!(file = %file_path.display(), error = %e, "文件读取失败");
            e
        })?;

        let file_name = file_path.file_name().and_then(|n| n.to_str());
        self.import_text(kind, &content, index, actor, file_name)
            .await
    }
}

// 辅助方法
impl<S> RecordImporterImpl<S>
where
    S: EntityStore,
{
    /// 单行处理；任何阶段失败都不会到达写入
    async fn process_row(
        &self,
        kind: RecordKind,
        row: &ParsedRow,
        index: &ReferenceIndex,
        actor: &ActorContext,
        conflict_handler: &mut ConflictHandler,
    ) -> Result<CreatedEntity, RowRejection> {
        if row.unterminated_quote {
            return Err(RowRejection {
                kind: LineErrorKind::Malformed,
                message: "unterminated quote".to_string(),
            });
        }

        let mapped = self
            .field_mapper
            .map_row(kind, row, index, &self.settings)?;

        if let Some(violation) = self.dq_validator.validate(&mapped) {
            return Err(RowRejection {
                kind: LineErrorKind::Validation,
                message: violation,
            });
        }

        if let Some(conflict) = conflict_handler.check(mapped.email()) {
            return Err(RowRejection {
                kind: LineErrorKind::Conflict,
                message: conflict,
            });
        }

        let result = match &mapped {
            ImportRow::Student(student) => self.store.create_student(student, actor).await,
            ImportRow::Teacher(teacher) => self.store.create_teacher(teacher, actor).await,
        };

        // 写入失败的邮箱不占用，后续同邮箱行仍可写入
        let created = result.map_err(|e| RowRejection {
            kind: LineErrorKind::Persistence,
            message: e.to_string(),
        })?;
        conflict_handler.claim(mapped.email(), row.line_number);
        Ok(created)
    }

    /// 表头与布局不一致时仅告警（按位置映射，不按列名）
    fn check_header(&self, kind: RecordKind, header: &ParsedRow) {
        let expected = kind.columns();
        let matches = header.fields.len() == expected.len()
            && header
                .fields
                .iter()
                .zip(expected.iter())
                .all(|(actual, expected)| actual.eq_ignore_ascii_case(expected));

        if !matches {
            warn!(
                kind = %kind,
                expected = ?expected,
                actual = ?header.fields,
                "表头与导入模板不一致，按列位置映射"
            );
        }
    }
}
