// ==========================================
// 高校管理系统 - 领域类型定义
// ==========================================
// 职责: 导入记录类型选择器、行级错误分类
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 记录类型 (Record Kind)
// ==========================================
// 决定一份导入文件的列布局与必填字段
// 序列化格式: lowercase (与 CLI 参数、数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Student, // 学生
    Teacher, // 教师
}

impl RecordKind {
    /// 该类型的列布局（与导入模板表头一致）
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Student => &[
                "Name",
                "Email",
                "Mobile",
                "Department",
                "Semester",
                "Section",
                "Password",
            ],
            RecordKind::Teacher => &[
                "Name",
                "Email",
                "Mobile",
                "Department",
                "Qualification",
                "Experience",
                "Subjects",
                "Password",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Student => "student",
            RecordKind::Teacher => "teacher",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "students" => Ok(RecordKind::Student),
            "teacher" | "teachers" => Ok(RecordKind::Teacher),
            other => Err(format!("unknown record kind: {}", other)),
        }
    }
}

// ==========================================
// 行级错误分类 (Line Error Kind)
// ==========================================
// 结构性错误不在此列: 结构性错误直接终止整个导入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineErrorKind {
    Malformed,   // 引号未闭合
    Validation,  // 必填缺失/格式错误
    Resolution,  // 院系名称无法解析
    Conflict,    // 邮箱重复（文件内/已注册）
    Persistence, // 外部写入失败
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineErrorKind::Malformed => write!(f, "MALFORMED"),
            LineErrorKind::Validation => write!(f, "VALIDATION"),
            LineErrorKind::Resolution => write!(f, "RESOLUTION"),
            LineErrorKind::Conflict => write!(f, "CONFLICT"),
            LineErrorKind::Persistence => write!(f, "PERSISTENCE"),
        }
    }
}
