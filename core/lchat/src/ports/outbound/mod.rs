//! Outbound ポート: アプリが外界（履歴ファイル）を使うための trait

pub mod history_store;

pub use history_store::HistoryStore;
