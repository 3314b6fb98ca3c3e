// ==========================================
// 高校管理系统 - 院系 Repository
// ==========================================
// 职责: 院系 CRUD；为导入提供参照数据 {name, id}
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{department_name_key, Department};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

pub struct DepartmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DepartmentRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Department> {
        Ok(Department {
            department_id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    /// 新增院系（name_key 唯一，与导入解析同一规范化规则）
    pub fn insert(&self, name: &str, code: Option<&str>) -> RepositoryResult<Department> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::ValidationError(
                "department name must not be empty".to_string(),
            ));
        }

        let department = Department {
            department_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            created_at: Utc::now(),
        };

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO departments (department_id, name, name_key, code, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                department.department_id,
                department.name,
                department_name_key(&department.name),
                department.code,
                department.created_at
            ],
        )?;

        Ok(department)
    }

    /// 全部院系（按名称排序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Department>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT department_id, name, code, created_at FROM departments ORDER BY name",
        )?;
        let rows = stmt.query_map([], Self::map_row)?;

        let mut departments = Vec::new();
        for department in rows {
            departments.push(department?);
        }
        Ok(departments)
    }
}
