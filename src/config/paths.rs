// ==========================================
// 高校管理系统 - 默认数据库路径
// ==========================================

use std::path::PathBuf;

/// 环境变量: 显式指定数据库路径（调试/测试/CI）
pub const DB_PATH_ENV: &str = "COLLEGE_IMPORT_DB_PATH";

/// 获取默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./college_import.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("college-import");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("college_import.db");
        }
    }

    path.to_string_lossy().to_string()
}
