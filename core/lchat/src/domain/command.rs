//! lchat コマンドの enum（Command Pattern）
//!
//! 1 回だけ送る / 対話ループ / 履歴表示の分岐を enum で明示する。

/// lchat の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum LchatCommand {
    /// ヘルプ表示
    Help,
    /// 現在の履歴を JSON で表示して終了（サーバーには接続しない）
    ShowHistory,
    /// メッセージを 1 件送って応答を表示
    Send { message: String },
    /// 標準入力から 1 行ずつ読み、応答を表示し続ける
    Interactive,
}
