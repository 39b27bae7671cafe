//! 会話履歴の永続化 Outbound ポート
//!
//! 純粋なデータアクセス。ビジネスロジックは持たない。

use common::domain::HistoryPath;
use common::error::Error;
use common::msg::Turn;

/// 会話履歴を読み書きする能力
pub trait HistoryStore: Send + Sync {
    /// ファイルが存在しなければ空列を返す（エラーではない）。
    /// 存在するが解釈できなければ `Error::Decode`。
    fn load(&self, path: &HistoryPath) -> Result<Vec<Turn>, Error>;

    /// 全ターンを上書き保存する。書き込み失敗は `Error::Io`。
    fn save(&self, path: &HistoryPath, turns: &[Turn]) -> Result<(), Error>;
}
