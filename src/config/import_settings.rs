// ==========================================
// 高校管理系统 - 导入配置快照
// ==========================================
// 每次导入运行开始时读取一次，运行期间只读
// ==========================================

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ROWS: usize = 5_000;
pub const DEFAULT_MAX_SEMESTER: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub max_rows: usize,
    pub max_semester: u32,
    #[serde(skip_serializing)]
    pub default_password: Option<String>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_semester: DEFAULT_MAX_SEMESTER,
            default_password: None,
        }
    }
}
