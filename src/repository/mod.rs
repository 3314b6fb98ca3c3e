// ==========================================
// 高校管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含导入规则
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod department_repo;
pub mod entity_store;
pub mod entity_store_impl;
pub mod error;

// 重导出核心仓储
pub use department_repo::DepartmentRepository;
pub use entity_store::EntityStore;
pub use entity_store_impl::SqliteEntityStore;
pub use error::{RepositoryError, RepositoryResult};
