// ==========================================
// 高校管理系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::import_settings::ImportSettings;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 单次导入允许的最大数据行数
    ///
    /// # 默认值
    /// - 5000
    async fn get_max_rows(&self) -> RepositoryResult<usize>;

    /// 学生学期上限（学期取值范围 1..=max）
    ///
    /// # 默认值
    /// - 8
    async fn get_max_semester(&self) -> RepositoryResult<u32>;

    /// 口令列为空时使用的默认口令
    ///
    /// # 返回
    /// - None: 未配置，口令列为必填
    async fn get_default_password(&self) -> RepositoryResult<Option<String>>;

    /// 读取本次导入运行使用的配置快照
    async fn load_settings(&self) -> RepositoryResult<ImportSettings> {
        Ok(ImportSettings {
            max_rows: self.get_max_rows().await?,
            max_semester: self.get_max_semester().await?,
            default_password: self.get_default_password().await?,
        })
    }
}
