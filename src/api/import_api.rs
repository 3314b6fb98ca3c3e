// ==========================================
// 高校管理系统 - 批量导入API
// ==========================================
// 职责: 封装导入相关功能（导入、模板、院系参照、配置）
// 每次调用打开一条连接并在组件间共享
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::domain::{ActorContext, Department, ImportOutcome, LineError, RecordKind};
use crate::importer::{render_template, RecordImporter, RecordImporterImpl, ReferenceIndex};
use crate::repository::{DepartmentRepository, SqliteEntityStore};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 批次ID
    pub batch_id: String,
    /// 记录类型
    pub record_kind: RecordKind,
    /// 数据行数（不含表头与空白行）
    pub total_rows: usize,
    /// 成功写入数
    pub success_count: usize,
    /// 失败数
    pub failed_count: usize,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
    /// 逐行结果
    pub outcome: ImportOutcome,
}

impl ImportApiResponse {
    pub fn errors(&self) -> &[LineError] {
        self.outcome.errors()
    }

    pub fn report_lines(&self) -> Vec<String> {
        self.outcome.report_lines()
    }
}

/// 导入API
pub struct ImportApi {
    db_path: String,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// 打开连接并确保表结构存在
    ///
    /// 已存在的库必须与当前 schema_version 一致，否则拒绝使用
    fn open(&self) -> ApiResult<Arc<Mutex<Connection>>> {
        let conn = open_sqlite_connection(&self.db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;

        let version =
            read_schema_version(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        if let Some(version) = version {
            if version != CURRENT_SCHEMA_VERSION {
                return Err(ApiError::DatabaseError(format!(
                    "unsupported schema version {} (expected {})",
                    version, CURRENT_SCHEMA_VERSION
                )));
            }
        }

        init_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        Ok(Arc::new(Mutex::new(conn)))
    }

    /// 导入学生/教师
    ///
    /// # 参数
    /// - kind: 记录类型
    /// - file_path: 文件路径
    /// - actor: 操作人
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果（可能包含逐行错误）
    /// - Err(ApiError): 结构性错误（文件不可读、空文件等）
    pub async fn import_file(
        &self,
        kind: RecordKind,
        file_path: &Path,
        actor: &ActorContext,
    ) -> ApiResult<ImportApiResponse> {
        let conn = self.open()?;

        // 配置快照
        let config = ConfigManager::from_connection(conn.clone())?;
        let settings = config.load_settings().await?;

        // 院系参照（运行前加载一次）
        let departments = DepartmentRepository::from_connection(conn.clone()).list_all()?;
        let index = ReferenceIndex::from_departments(&departments);
        info!(departments = index.len(), "院系参照加载完成");

        let store = SqliteEntityStore::from_connection(conn);
        let importer = RecordImporterImpl::with_defaults(store, settings);

        let report = importer.import_file(kind, file_path, &index, actor).await?;

        Ok(ImportApiResponse {
            batch_id: report.batch.batch_id.clone(),
            record_kind: kind,
            total_rows: report.outcome.processed(),
            success_count: report.success_count(),
            failed_count: report.error_count(),
            elapsed_ms: report.batch.elapsed_ms,
            outcome: report.outcome,
        })
    }

    /// 导入模板文本
    pub fn template(&self, kind: RecordKind) -> ApiResult<String> {
        Ok(render_template(kind)?)
    }

    /// 院系列表
    pub fn list_departments(&self) -> ApiResult<Vec<Department>> {
        let conn = self.open()?;
        Ok(DepartmentRepository::from_connection(conn).list_all()?)
    }

    /// 新增院系
    pub fn add_department(&self, name: &str, code: Option<&str>) -> ApiResult<Department> {
        let conn = self.open()?;
        Ok(DepartmentRepository::from_connection(conn).insert(name, code)?)
    }

    /// 写入导入配置
    pub fn set_config(&self, key: &str, value: &str) -> ApiResult<()> {
        if !key.starts_with("import.") {
            return Err(ApiError::InvalidInput(format!("unknown config key: {}", key)));
        }
        let conn = self.open()?;
        ConfigManager::from_connection(conn)?.set_config_value(key, value)?;
        Ok(())
    }

    /// 已写入的配置项（按 key 排序）
    pub fn list_config(&self) -> ApiResult<Vec<(String, String)>> {
        let conn = self.open()?;
        let snapshot = ConfigManager::from_connection(conn)?.get_config_snapshot()?;

        let mut entries: Vec<(String, String)> = snapshot.into_iter().collect();
        entries.sort();
        Ok(entries)
    }
}
