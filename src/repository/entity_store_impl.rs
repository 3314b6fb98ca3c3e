// ==========================================
// 高校管理系统 - 实体写入 Repository 实现
// ==========================================
// 职责: 实现 EntityStore（使用 rusqlite）
// 红线: Repository 不含导入规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{
    ActorContext, CreatedEntity, ImportBatch, RecordKind, StudentImportRow, TeacherImportRow,
};
use crate::repository::entity_store::EntityStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// 口令哈希: Argon2id + 随机盐，存储 PHC 字符串
fn hash_password(password: &str) -> RepositoryResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RepositoryError::InternalError(format!("password hashing failed: {}", e)))
}

// ==========================================
// SqliteEntityStore
// ==========================================
pub struct SqliteEntityStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEntityStore {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（与 ConfigManager / DepartmentRepository 共享连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按批次 ID 查询批次记录
    pub fn find_batch(&self, batch_id: &str) -> RepositoryResult<Option<ImportBatch>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                r#"
                SELECT batch_id, record_kind, file_name, total_rows, success_rows,
                       failed_rows, imported_by, imported_at, elapsed_ms, report_json
                FROM import_batch WHERE batch_id = ?1
                "#,
                params![batch_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, i32>(3)?,
                        row.get::<_, i32>(4)?,
                        row.get::<_, i32>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, chrono::DateTime<Utc>>(7)?,
                        row.get::<_, i64>(8)?,
                        row.get::<_, Option<String>>(9)?,
                    ))
                },
            )
            .optional()?;

        let Some((
            batch_id,
            kind,
            file_name,
            total_rows,
            success_rows,
            failed_rows,
            imported_by,
            imported_at,
            elapsed_ms,
            report_json,
        )) = row
        else {
            return Ok(None);
        };

        let record_kind = kind
            .parse::<RecordKind>()
            .map_err(RepositoryError::ValidationError)?;

        Ok(Some(ImportBatch {
            batch_id,
            record_kind,
            file_name,
            total_rows,
            success_rows,
            failed_rows,
            imported_by,
            imported_at,
            elapsed_ms,
            report_json,
        }))
    }

    /// 统计某类记录总数
    pub fn count(&self, kind: RecordKind) -> RepositoryResult<i64> {
        let conn = self.lock()?;
        let sql = match kind {
            RecordKind::Student => "SELECT COUNT(*) FROM students",
            RecordKind::Teacher => "SELECT COUNT(*) FROM teachers",
        };
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    async fn create_student(
        &self,
        row: &StudentImportRow,
        actor: &ActorContext,
    ) -> RepositoryResult<CreatedEntity> {
        let student_id = Uuid::new_v4().to_string();
        let password_hash = hash_password(&row.password)?;
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO students (
                student_id, name, email, mobile, department_id, semester, section,
                password_hash, created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                student_id,
                row.name,
                row.email,
                row.mobile,
                row.department_id,
                row.semester,
                row.section,
                password_hash,
                actor.user_id,
                Utc::now(),
            ],
        )?;

        Ok(CreatedEntity {
            entity_id: student_id,
            kind: RecordKind::Student,
            email: row.email.clone(),
        })
    }

    async fn create_teacher(
        &self,
        row: &TeacherImportRow,
        actor: &ActorContext,
    ) -> RepositoryResult<CreatedEntity> {
        let teacher_id = Uuid::new_v4().to_string();
        let subjects_json = serde_json::to_string(&row.subjects)?;
        let password_hash = hash_password(&row.password)?;
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO teachers (
                teacher_id, name, email, mobile, department_id, qualification,
                experience_years, subjects, password_hash, created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                teacher_id,
                row.name,
                row.email,
                row.mobile,
                row.department_id,
                row.qualification,
                row.experience_years,
                subjects_json,
                password_hash,
                actor.user_id,
                Utc::now(),
            ],
        )?;

        Ok(CreatedEntity {
            entity_id: teacher_id,
            kind: RecordKind::Teacher,
            email: row.email.clone(),
        })
    }

    async fn registered_emails(&self, kind: RecordKind) -> RepositoryResult<HashSet<String>> {
        let conn = self.lock()?;
        let sql = match kind {
            RecordKind::Student => "SELECT LOWER(email) FROM students",
            RecordKind::Teacher => "SELECT LOWER(email) FROM teachers",
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut emails = HashSet::new();
        for email in rows {
            emails.insert(email?);
        }
        Ok(emails)
    }

    async fn insert_batch(&self, batch: &ImportBatch) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, record_kind, file_name, total_rows, success_rows, failed_rows,
                imported_by, imported_at, elapsed_ms, report_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                batch.batch_id,
                batch.record_kind.as_str(),
                batch.file_name,
                batch.total_rows,
                batch.success_rows,
                batch.failed_rows,
                batch.imported_by,
                batch.imported_at,
                batch.elapsed_ms,
                batch.report_json,
            ],
        )?;
        Ok(())
    }
}
