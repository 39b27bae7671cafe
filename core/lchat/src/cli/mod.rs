//! CLI レイヤー（引数解析・設定解決・対話ループ）

pub mod args;
pub mod interactive;
pub mod settings;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
pub use interactive::{run_interactive, write_exchange, InteractiveOptions};
pub use settings::{resolve_settings, Settings};
