// ==========================================
// 高校管理系统 - 冲突处理器实现
// ==========================================
// 职责: 检测同文件内/已注册的重复邮箱
// 策略: 同文件内首次出现者保留，后续出现记为冲突
// ==========================================

use std::collections::{HashMap, HashSet};

pub struct ConflictHandler {
    registered: HashSet<String>,
    first_seen: HashMap<String, usize>,
}

impl ConflictHandler {
    /// # 参数
    /// - registered: 已注册邮箱（运行开始时读取一次）
    pub fn new<I>(registered: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            registered: registered.into_iter().map(|e| e.to_lowercase()).collect(),
            first_seen: HashMap::new(),
        }
    }

    /// 检查邮箱是否冲突（不占用）
    ///
    /// # 返回
    /// - None: 无冲突
    /// - Some(描述): 冲突
    pub fn check(&self, email: &str) -> Option<String> {
        let key = email.to_lowercase();

        if self.registered.contains(&key) {
            return Some(format!("email already registered: {}", email));
        }

        self.first_seen.get(&key).map(|first_line| {
            format!(
                "duplicate email in file: {} (first seen on line {})",
                email, first_line
            )
        })
    }

    /// 占用邮箱；仅在写入成功后调用
    pub fn claim(&mut self, email: &str, line_number: usize) {
        self.first_seen
            .entry(email.to_lowercase())
            .or_insert(line_number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflicts() {
        let mut handler = ConflictHandler::new(Vec::new());
        assert_eq!(handler.check("a@x.edu"), None);
        handler.claim("a@x.edu", 2);
        assert_eq!(handler.check("b@x.edu"), None);
    }

    #[test]
    fn test_duplicate_in_file() {
        let mut handler = ConflictHandler::new(Vec::new());
        handler.claim("a@x.edu", 2);
        assert_eq!(
            handler.check("A@x.edu").as_deref(),
            Some("duplicate email in file: A@x.edu (first seen on line 2)")
        );
        // 重复占用不改变首次出现行
        handler.claim("a@x.edu", 7);
        assert!(handler.check("a@x.edu").unwrap().contains("line 2"));
    }

    #[test]
    fn test_unclaimed_email_stays_free() {
        let handler = ConflictHandler::new(Vec::new());
        assert_eq!(handler.check("a@x.edu"), None);
        assert_eq!(handler.check("a@x.edu"), None);
    }

    #[test]
    fn test_already_registered() {
        let handler = ConflictHandler::new(vec!["Taken@X.edu".to_string()]);
        assert_eq!(
            handler.check("taken@x.edu").as_deref(),
            Some("email already registered: taken@x.edu")
        );
    }
}
