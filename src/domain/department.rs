// ==========================================
// 高校管理系统 - 院系领域模型
// ==========================================
// 用途: 导入时院系名称 → 院系 ID 的参照数据
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Department - 院系
// ==========================================
// 对齐: departments 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub department_id: String,       // 院系 ID（稳定标识）
    pub name: String,                // 院系名称（人类可读，导入文件中填写）
    pub code: Option<String>,        // 院系代码（可选）
    pub created_at: DateTime<Utc>,
}

/// 院系名称匹配键: TRIM + Unicode 小写
///
/// 导入解析与 departments.name_key 唯一约束共用
pub fn department_name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
