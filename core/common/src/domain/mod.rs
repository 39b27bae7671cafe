//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use std::path::{Path, PathBuf};

/// 推論サーバーの generate エンドポイント既定値
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";

/// 既定のモデル ID
pub const DEFAULT_MODEL: &str = "deepseek-r1:8b";

/// 既定の履歴ファイル（カレントディレクトリ相対）
pub const DEFAULT_HISTORY_FILE: &str = "chat_log.json";

/// 会話履歴ファイルのパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPath(PathBuf);

impl HistoryPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl Default for HistoryPath {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

impl std::ops::Deref for HistoryPath {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HistoryPath {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HistoryPath {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

/// モデル ID（deepseek-r1:8b 等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for ModelName {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl std::ops::Deref for ModelName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// 推論サーバーの generate エンドポイント URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
