//! 会話履歴（History）のドメイン型
//!
//! Turn の追記専用の列。挿入順＝会話順。1 回の成功したやり取りで
//! user → assistant の 2 件が追加される。

use common::msg::{Role, Turn};

/// 会話履歴
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(dead_code)] // テストで使用。公開APIとして保持
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// 末尾が応答待ちの user ターンなら取り除いて返す
    pub fn rollback_pending_user(&mut self) -> Option<Turn> {
        match self.turns.last() {
            Some(t) if t.role() == Role::User => self.turns.pop(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut h = History::new();
        h.push_user("hello");
        h.push_assistant("hi there");
        assert_eq!(h.len(), 2);
        assert_eq!(h.turns()[0], Turn::user("hello"));
        assert_eq!(h.turns()[1], Turn::assistant("hi there"));
    }

    #[test]
    fn test_rollback_pending_user() {
        let mut h = History::from_turns(vec![Turn::user("a"), Turn::assistant("b")]);
        assert_eq!(h.rollback_pending_user(), None);
        assert_eq!(h.len(), 2);

        h.push_user("c");
        assert_eq!(h.rollback_pending_user(), Some(Turn::user("c")));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_rollback_on_empty() {
        let mut h = History::new();
        assert_eq!(h.rollback_pending_user(), None);
        assert!(h.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut h = History::from_turns(vec![Turn::user("a"), Turn::assistant("b")]);
        h.clear();
        assert!(h.is_empty());
    }
}
