//! 環境変数解決 Outbound ポート
//!
//! 設定値とログファイルの場所を環境変数から解決する。
//! cli / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::error::Error;
use std::path::PathBuf;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の固定マップなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を読む。未設定または空文字列なら None。
    fn var(&self, key: &str) -> Option<String>;

    /// 構造化ログの出力先
    ///
    /// 優先順位:
    /// 1. LCHAT_LOG
    /// 2. $XDG_STATE_HOME/lchat/log.jsonl
    /// 3. $HOME/.local/state/lchat/log.jsonl
    fn resolve_log_file_path(&self) -> Result<PathBuf, Error> {
        if let Some(path) = self.var("LCHAT_LOG") {
            return Ok(PathBuf::from(path));
        }
        let state_base = self
            .var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                self.var("HOME")
                    .map(|h| PathBuf::from(h).join(".local").join("state"))
            })
            .ok_or_else(|| Error::env("HOME is not set"))?;
        Ok(state_base.join("lchat").join("log.jsonl"))
    }
}
