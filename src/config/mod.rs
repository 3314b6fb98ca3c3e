// ==========================================
// 高校管理系统 - 配置层
// ==========================================
// 职责: 导入配置读取，带默认值
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;
pub mod import_settings;
pub mod paths;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::ImportConfigReader;
pub use import_settings::ImportSettings;
pub use paths::get_default_db_path;
