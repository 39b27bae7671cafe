use std::sync::Arc;

use common::adapter::{NoopLog, StdFileSystem};
use common::domain::HistoryPath;
use common::llm::ProviderKind;
use common::msg::Turn;

use crate::cli::{Config, Settings};
use crate::ports::inbound::RunLchatApp;
use crate::wiring;

/// 標準アダプターで App を組み立て、Runner で run する（テスト用の入口）
fn run_app(settings: Settings, config: Config) -> Result<i32, common::error::Error> {
    let app = wiring::wire_lchat_with(settings, Arc::new(StdFileSystem), Arc::new(NoopLog))?;
    let runner = crate::Runner { app };
    runner.run(config)
}

fn echo_settings(path: &HistoryPath) -> Settings {
    Settings {
        provider: ProviderKind::Echo,
        history_path: path.clone(),
        ..Default::default()
    }
}

#[test]
fn test_run_app_with_help() {
    let tmp = tempfile::tempdir().unwrap();
    let path = HistoryPath::new(tmp.path().join("chat_log.json"));
    let config = Config {
        help: true,
        ..Default::default()
    };
    assert_eq!(run_app(echo_settings(&path), config).unwrap(), 0);
    assert!(!path.exists());
}

#[test]
fn test_run_app_send_with_echo_provider_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let path = HistoryPath::new(tmp.path().join("chat_log.json"));
    let config = Config {
        message_args: vec!["hello".to_string(), "world".to_string()],
        ..Default::default()
    };
    assert_eq!(run_app(echo_settings(&path), config).unwrap(), 0);

    let saved: Vec<Turn> =
        serde_json::from_str(&std::fs::read_to_string(&*path).unwrap()).unwrap();
    assert_eq!(
        saved,
        vec![
            Turn::user("hello world"),
            Turn::assistant("User: hello world")
        ]
    );
}

#[test]
fn test_run_app_show_history_with_corrupt_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = HistoryPath::new(tmp.path().join("chat_log.json"));
    std::fs::write(&*path, "garbage").unwrap();
    let config = Config {
        show_history: true,
        ..Default::default()
    };
    let err = run_app(echo_settings(&path), config).unwrap_err();
    assert_eq!(err.exit_code(), 65);
}

#[test]
fn test_run_app_new_chat_ignores_corrupt_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = HistoryPath::new(tmp.path().join("chat_log.json"));
    std::fs::write(&*path, "garbage").unwrap();
    let settings = Settings {
        new_chat: true,
        ..echo_settings(&path)
    };
    let config = Config {
        message_args: vec!["fresh".to_string()],
        ..Default::default()
    };
    assert_eq!(run_app(settings, config).unwrap(), 0);
    let saved: Vec<Turn> =
        serde_json::from_str(&std::fs::read_to_string(&*path).unwrap()).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0], Turn::user("fresh"));
}
