//! エラーハンドリング
//!
//! 失敗は種類ごとにタグ付けし、原因メッセージを保持したまま呼び出し元へ返す。
//! 自動リトライはしない。プロセスを終了させるかどうかは呼び出し元が決める。

/// lchat 共通のエラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 推論サーバーへの接続・送受信の失敗（非 2xx ステータスを含む）
    #[error("network error: {0}")]
    Network(String),

    /// サーバー応答または履歴ファイルの JSON が解釈できない
    #[error("decode error: {0}")]
    Decode(String),

    /// シリアライズ失敗（通常は発生しない）
    #[error("encode error: {0}")]
    Encode(String),

    /// ファイルの読み書き失敗
    #[error("I/O error: {0}")]
    Io(String),

    /// 引数不正
    #[error("{0}")]
    InvalidArgs(String),

    /// 環境変数から設定を解決できない
    #[error("environment error: {0}")]
    Env(String),
}

impl Error {
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Error::Encode(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgs(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    /// プロセス終了コード（sysexits.h 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgs(_) => 64,
            Error::Decode(_) => 65,
            Error::Network(_) => 69,
            Error::Io(_) => 74,
            Error::Encode(_) | Error::Env(_) => 70,
        }
    }

    /// 使い方の誤りか（main で usage を表示する判定に使う）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgs(_))
    }

    /// ログの kind フィールド用の短い名前
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::Network(_) => "network",
            Error::Decode(_) => "decode",
            Error::Encode(_) => "encode",
            Error::Io(_) => "io",
            Error::InvalidArgs(_) => "invalid_args",
            Error::Env(_) => "env",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
