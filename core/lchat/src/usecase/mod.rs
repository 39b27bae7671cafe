//! ユースケース（ポート経由で I/O を行うアプリケーションロジック）

pub mod chat_session;

pub use chat_session::{ChatSession, Exchange, SessionDeps};
