//! lchat 共通ライブラリ
//!
//! `lchat` コマンドが使うエラー型・ポート・標準アダプター・推論サーバープロバイダを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype と既定値）
pub mod domain;

/// 会話ターン（Turn / Role）
pub mod msg;

/// Ports & Adapters のポート定義
pub mod ports;

/// 標準アダプター
pub mod adapter;

/// 推論サーバープロバイダ
pub mod llm;
