// ==========================================
// 高校管理系统 - 实体写入 Repository Trait
// ==========================================
// 职责: 定义导入流程所需的外部数据访问接口（不包含业务逻辑）
// 红线: Repository 不含导入规则，只做数据 CRUD
// ==========================================

use crate::domain::{
    ActorContext, CreatedEntity, ImportBatch, RecordKind, StudentImportRow, TeacherImportRow,
};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::collections::HashSet;

// ==========================================
// EntityStore Trait
// ==========================================
// 用途: 导入流程的外部写入端（创建学生/教师、记录批次）
// 实现者: SqliteEntityStore；测试中可替换为内存实现
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// 创建学生
    ///
    /// # 返回
    /// - Ok(CreatedEntity): 写入回执
    /// - Err: 错误消息将原样写入该行的导入报告
    async fn create_student(
        &self,
        row: &StudentImportRow,
        actor: &ActorContext,
    ) -> RepositoryResult<CreatedEntity>;

    /// 创建教师
    async fn create_teacher(
        &self,
        row: &TeacherImportRow,
        actor: &ActorContext,
    ) -> RepositoryResult<CreatedEntity>;

    /// 查询某类记录已注册的邮箱（小写）
    ///
    /// # 用途
    /// - 每次导入运行前调用一次，用于跨批次重复检测
    async fn registered_emails(&self, kind: RecordKind) -> RepositoryResult<HashSet<String>>;

    /// 记录导入批次
    async fn insert_batch(&self, batch: &ImportBatch) -> RepositoryResult<()>;
}
