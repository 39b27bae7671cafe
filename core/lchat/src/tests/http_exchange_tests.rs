//! 実 HTTP（OllamaProvider）を通したやり取り。推論サーバーはスタブ。

use std::sync::Arc;
use std::time::Duration;

use common::adapter::NoopLog;
use common::domain::{Endpoint, ModelName};
use common::error::Error;
use common::llm::OllamaProvider;
use common::msg::Turn;

use crate::domain::PromptStyle;
use crate::tests::stub_server::{refused_endpoint, StubServer};
use crate::tests::stubs::{deps_with, temp_history};
use crate::usecase::ChatSession;

fn ollama(url: &str) -> Arc<OllamaProvider> {
    Arc::new(
        OllamaProvider::new(
            Endpoint::new(url),
            ModelName::default(),
            Some(Duration::from_secs(10)),
            Arc::new(NoopLog),
        )
        .unwrap(),
    )
}

#[test]
fn test_exchange_against_stub_server() {
    let server = StubServer::start(
        "200 OK",
        r#"{"response": "<think>t</think>hi there", "done": true}"#,
    );
    let (_tmp, path) = temp_history();
    let mut session =
        ChatSession::load(deps_with(ollama(&server.url)), path.clone(), PromptStyle::Labeled)
            .unwrap();

    let answer = session.send_message("hello").unwrap();
    assert_eq!(answer, "hi there");
    assert_eq!(
        session.turns(),
        [Turn::user("hello"), Turn::assistant("hi there")].as_slice()
    );
    let saved: Vec<Turn> =
        serde_json::from_str(&std::fs::read_to_string(&*path).unwrap()).unwrap();
    assert_eq!(saved, session.turns());

    let body = server.request_json();
    assert_eq!(body["model"], "deepseek-r1:8b");
    assert_eq!(body["prompt"], "User: hello\n");
    assert_eq!(body["stream"], false);
}

#[test]
fn test_request_line_and_content_type() {
    let server = StubServer::start("200 OK", r#"{"response": "ok", "done": true}"#);
    let (_tmp, path) = temp_history();
    let mut session = ChatSession::new(deps_with(ollama(&server.url)), path, PromptStyle::Legacy);
    session.send_message("hello").unwrap();

    let request = server.request();
    assert!(request.starts_with("POST /api/generate HTTP/1.1\r\n"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.contains(r#""prompt":"Userhello\n""#));
}

#[test]
fn test_connection_refused_leaves_file_unchanged() {
    let (_tmp, path) = temp_history();
    let original = "[\n  {\n    \"role\": \"user\",\n    \"content\": \"hi\"\n  },\n  {\n    \"role\": \"assistant\",\n    \"content\": \"yo\"\n  }\n]";
    std::fs::write(&*path, original).unwrap();

    let mut session =
        ChatSession::load(deps_with(ollama(&refused_endpoint())), path.clone(), PromptStyle::Labeled)
            .unwrap();
    let err = session.send_message("hello").unwrap_err();

    assert!(matches!(err, Error::Network(_)), "got {:?}", err);
    assert_eq!(err.exit_code(), 69);
    assert_eq!(std::fs::read_to_string(&*path).unwrap(), original);
    assert_eq!(session.turns().len(), 2);
}

#[test]
fn test_malformed_reply_is_decode_error() {
    let server = StubServer::start("200 OK", "this is not json");
    let (_tmp, path) = temp_history();
    let mut session =
        ChatSession::new(deps_with(ollama(&server.url)), path.clone(), PromptStyle::Labeled);

    let err = session.send_message("hello").unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {:?}", err);
    assert!(session.turns().is_empty());
    assert!(!path.exists());
    server.request();
}

#[test]
fn test_server_error_status_is_network_error_with_message() {
    let server = StubServer::start(
        "404 Not Found",
        r#"{"error": "model 'deepseek-r1:8b' not found"}"#,
    );
    let (_tmp, path) = temp_history();
    let mut session = ChatSession::new(deps_with(ollama(&server.url)), path, PromptStyle::Labeled);

    let err = session.send_message("hello").unwrap_err();
    match err {
        Error::Network(msg) => assert!(msg.contains("not found"), "{}", msg),
        other => panic!("expected network error, got {:?}", other),
    }
    server.request();
}
