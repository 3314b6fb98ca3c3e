// ==========================================
// 高校管理系统 - 学生/教师导入记录
// ==========================================
// 职责: 导入行映射后的强类型记录（每种记录类型一个变体）
// 红线: 必填字段为非 Option，编译期保证
// ==========================================

use crate::domain::types::RecordKind;
use serde::{Deserialize, Serialize};

// ==========================================
// StudentImportRow - 学生导入行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentImportRow {
    pub line_number: usize,          // 源文件行号（表头为第 1 行）

    // ===== 必填 =====
    pub name: String,
    pub email: String,               // 已转小写
    pub department_id: String,       // 已解析的院系 ID
    pub department_name: String,     // 源文件中填写的院系名称（已 TRIM）
    #[serde(skip_serializing, default)]
    pub password: String,

    // ===== 可选 =====
    pub mobile: Option<String>,
    pub semester: Option<u32>,
    pub section: Option<String>,
}

// ==========================================
// TeacherImportRow - 教师导入行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherImportRow {
    pub line_number: usize,

    // ===== 必填 =====
    pub name: String,
    pub email: String,
    pub department_id: String,
    pub department_name: String,
    #[serde(skip_serializing, default)]
    pub password: String,

    // ===== 可选 =====
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub experience_years: Option<u32>,
    pub subjects: Vec<String>,       // 以 ';' 或 ',' 拆分
}

// ==========================================
// ImportRow - 导入行（按记录类型区分）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImportRow {
    Student(StudentImportRow),
    Teacher(TeacherImportRow),
}

impl ImportRow {
    pub fn kind(&self) -> RecordKind {
        match self {
            ImportRow::Student(_) => RecordKind::Student,
            ImportRow::Teacher(_) => RecordKind::Teacher,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            ImportRow::Student(row) => row.line_number,
            ImportRow::Teacher(row) => row.line_number,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            ImportRow::Student(row) => &row.email,
            ImportRow::Teacher(row) => &row.email,
        }
    }

    pub fn mobile(&self) -> Option<&str> {
        match self {
            ImportRow::Student(row) => row.mobile.as_deref(),
            ImportRow::Teacher(row) => row.mobile.as_deref(),
        }
    }
}

// ==========================================
// CreatedEntity - 写入成功回执
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEntity {
    pub entity_id: String,
    pub kind: RecordKind,
    pub email: String,
}
