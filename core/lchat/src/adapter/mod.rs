//! lchat 固有のアダプター（Outbound ポートの実装）

pub mod json_history_store;
pub mod sigint;

pub use json_history_store::JsonHistoryStore;
pub use sigint::install_exit_on_interrupt;
