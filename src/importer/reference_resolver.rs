// ==========================================
// 高校管理系统 - 院系参照解析
// ==========================================
// 职责: 院系名称（自由文本）→ 院系 ID
// 规则: TRIM 后大小写不敏感的精确匹配；不匹配时报错，绝不新建院系
// ==========================================

use crate::domain::{department_name_key, Department};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// 名称无法解析
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    #[error("department not found: {name}")]
    NotFound { name: String },

    /// 规范化后与多个院系同名，拒绝猜测
    #[error("department name is ambiguous: {name} ({candidates} departments match)")]
    Ambiguous { name: String, candidates: usize },
}

impl UnresolvedReference {
    /// TRIM 后的原始文本
    pub fn name(&self) -> &str {
        match self {
            UnresolvedReference::NotFound { name } | UnresolvedReference::Ambiguous { name, .. } => {
                name
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum IndexEntry {
    Unique(String),
    Ambiguous(usize),
}

// ==========================================
// ReferenceIndex - 参照索引
// ==========================================
// 每次导入运行构建一次，运行期间只读
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    by_name: HashMap<String, IndexEntry>,
}

impl ReferenceIndex {
    /// 由 {名称, ID} 集合构建
    ///
    /// 规范化后重名的条目标记为歧义，解析时报错
    pub fn from_entries<I, N, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<String>,
    {
        let mut by_name: HashMap<String, IndexEntry> = HashMap::new();
        for (name, id) in entries {
            let key = department_name_key(name.as_ref());
            if key.is_empty() {
                continue;
            }
            let id = id.into();
            match by_name.get_mut(&key) {
                None => {
                    by_name.insert(key, IndexEntry::Unique(id));
                }
                Some(entry) => {
                    let next = match entry {
                        IndexEntry::Unique(existing) if *existing == id => continue,
                        IndexEntry::Unique(_) => IndexEntry::Ambiguous(2),
                        IndexEntry::Ambiguous(n) => IndexEntry::Ambiguous(*n + 1),
                    };
                    warn!(name = %name.as_ref(), "reference name collides after normalization");
                    *entry = next;
                }
            }
        }
        Self { by_name }
    }

    pub fn from_departments(departments: &[Department]) -> Self {
        Self::from_entries(
            departments
                .iter()
                .map(|d| (d.name.as_str(), d.department_id.clone())),
        )
    }

    /// 解析名称
    ///
    /// # 返回
    /// - Ok(id): 唯一匹配
    /// - Err(UnresolvedReference): 未匹配或歧义，携带 TRIM 后的原始文本
    pub fn resolve(&self, name: &str) -> Result<&str, UnresolvedReference> {
        let trimmed = name.trim().to_string();
        match self.by_name.get(&department_name_key(name)) {
            Some(IndexEntry::Unique(id)) => Ok(id.as_str()),
            Some(IndexEntry::Ambiguous(candidates)) => Err(UnresolvedReference::Ambiguous {
                name: trimmed,
                candidates: *candidates,
            }),
            None => Err(UnresolvedReference::NotFound { name: trimmed }),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ReferenceIndex {
        ReferenceIndex::from_entries(vec![
            ("Computer Science", "dept-1"),
            ("Mechanical Engineering", "dept-2"),
        ])
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(index().resolve("computer science"), Ok("dept-1"));
        assert_eq!(index().resolve("MECHANICAL ENGINEERING"), Ok("dept-2"));
    }

    #[test]
    fn test_trailing_space_trimmed() {
        assert_eq!(index().resolve("Computer Science "), Ok("dept-1"));
    }

    #[test]
    fn test_unresolved_names_text() {
        let err = index().resolve(" Computr Science ").unwrap_err();
        assert_eq!(err.name(), "Computr Science");
        assert_eq!(err.to_string(), "department not found: Computr Science");
    }

    #[test]
    fn test_names_colliding_after_lowercase_are_ambiguous() {
        let index = ReferenceIndex::from_entries(vec![
            ("Économie", "eco-1"),
            ("économie", "eco-2"),
            ("Physics", "p-1"),
        ]);
        let err = index.resolve("ÉCONOMIE").unwrap_err();
        assert!(matches!(err, UnresolvedReference::Ambiguous { candidates: 2, .. }));
        assert_eq!(
            err.to_string(),
            "department name is ambiguous: ÉCONOMIE (2 departments match)"
        );
        assert_eq!(index.resolve("physics"), Ok("p-1"));
    }

    #[test]
    fn test_same_id_listed_twice_stays_unique() {
        let index = ReferenceIndex::from_entries(vec![("Physics", "p-1"), ("PHYSICS", "p-1")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve("physics"), Ok("p-1"));
    }

    #[test]
    fn test_empty_index() {
        let index = ReferenceIndex::default();
        assert!(index.is_empty());
        assert!(index.resolve("Physics").is_err());
    }
}
