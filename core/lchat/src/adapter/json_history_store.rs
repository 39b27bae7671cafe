//! JSON ファイルへの会話履歴保存
//!
//! 形式は `[{"role": "user", "content": "..."}, ...]` を 2 スペースでインデントしたもの。
//! 保存は毎回全体の上書き。書き込み途中のクラッシュ対策（一時ファイル＋rename）はしない。

use std::sync::Arc;

use common::domain::HistoryPath;
use common::error::Error;
use common::msg::Turn;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};

use crate::ports::outbound::HistoryStore;

/// FileSystem 上の JSON ファイルに履歴を保存する HistoryStore 実装
pub struct JsonHistoryStore {
    fs: Arc<dyn FileSystem>,
    log: Arc<dyn Log>,
}

impl JsonHistoryStore {
    pub fn new(fs: Arc<dyn FileSystem>, log: Arc<dyn Log>) -> Self {
        Self { fs, log }
    }

    fn log_history(&self, message: &str, path: &HistoryPath, turns: usize) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, message)
                .layer("adapter")
                .kind("history")
                .field("path", path.display().to_string())
                .field("turns", turns),
        );
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self, path: &HistoryPath) -> Result<Vec<Turn>, Error> {
        if !self.fs.exists(path.as_ref()) {
            self.log_history("history file not found, starting empty", path, 0);
            return Ok(Vec::new());
        }
        let text = self.fs.read_to_string(path.as_ref())?;
        // `null` は空履歴として扱う
        let turns: Option<Vec<Turn>> = serde_json::from_str(&text).map_err(|e| {
            Error::decode(format!("Failed to parse history '{}': {}", path.display(), e))
        })?;
        let turns = turns.unwrap_or_default();
        self.log_history("history loaded", path, turns.len());
        Ok(turns)
    }

    fn save(&self, path: &HistoryPath, turns: &[Turn]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(turns)
            .map_err(|e| Error::encode(format!("Failed to serialize history: {}", e)))?;
        self.fs.write(path.as_ref(), &json)?;
        self.log_history("history saved", path, turns.len());
        Ok(())
    }
}
