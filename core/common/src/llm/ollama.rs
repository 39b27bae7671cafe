//! Ollama 互換 generate エンドポイント（POST /api/generate）プロバイダ
//!
//! リクエストは `{"model", "prompt", "stream": false}`、応答は `{"response", "done"}`。

use crate::domain::{Endpoint, ModelName};
use crate::error::Error;
use crate::llm::provider::{GenerateReply, InferenceProvider};
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Ollama 互換プロバイダ
pub struct OllamaProvider {
    endpoint: Endpoint,
    model: ModelName,
    client: reqwest::blocking::Client,
    log: Arc<dyn Log>,
}

impl OllamaProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `timeout` - None のときタイムアウトなし（応答が来るまでブロックする）
    pub fn new(
        endpoint: Endpoint,
        model: ModelName,
        timeout: Option<Duration>,
        log: Arc<dyn Log>,
    ) -> Result<Self, Error> {
        // reqwest::blocking は既定で 30 秒のタイムアウトを持つため明示的に上書きする
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            endpoint,
            model,
            client,
            log,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    /// リクエストペイロードを生成
    pub fn make_request_payload(&self, prompt: &str) -> Value {
        json!({
            "model": &*self.model,
            "prompt": prompt,
            "stream": false
        })
    }
}

/// 応答本文を GenerateReply にデコードする
pub fn parse_generate_response(body: &str) -> Result<GenerateReply, Error> {
    serde_json::from_str::<GenerateReply>(body)
        .map_err(|e| Error::decode(format!("Failed to parse generate response: {}", e)))
}

/// 非 2xx 応答のメッセージ（`{"error": "..."}` があればそれを使う）
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

impl InferenceProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn generate(&self, prompt: &str) -> Result<GenerateReply, Error> {
        let body = serde_json::to_string(&self.make_request_payload(prompt))
            .map_err(|e| Error::encode(format!("Failed to serialize request: {}", e)))?;

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint.as_str())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .map_err(|e| {
                Error::network(format!("HTTP request to {} failed: {}", self.endpoint, e))
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "generate response received")
                .layer("adapter")
                .kind("http")
                .field("endpoint", self.endpoint.as_str())
                .field("model", &*self.model)
                .field("status", status.as_u16())
                .field("elapsed_ms", started.elapsed().as_millis() as u64)
                .field("body_len", response_text.len()),
        );

        if !status.is_success() {
            return Err(Error::network(format!(
                "Inference server error: {}",
                error_message(status, &response_text)
            )));
        }

        parse_generate_response(&response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::NoopLog;

    fn provider(endpoint: &str) -> OllamaProvider {
        OllamaProvider::new(
            Endpoint::new(endpoint),
            ModelName::default(),
            Some(Duration::from_secs(5)),
            Arc::new(NoopLog),
        )
        .unwrap()
    }

    #[test]
    fn test_make_request_payload() {
        let p = provider("http://localhost:11434/api/generate");
        let payload = p.make_request_payload("Userhello\n");
        assert_eq!(payload["model"], "deepseek-r1:8b");
        assert_eq!(payload["prompt"], "Userhello\n");
        assert_eq!(payload["stream"], false);
        assert_eq!(payload.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_parse_generate_response() {
        let reply =
            parse_generate_response(r#"{"response":"<think>t</think>hi there","done":true}"#)
                .unwrap();
        assert_eq!(reply.response, "<think>t</think>hi there");
        assert!(reply.done);
    }

    #[test]
    fn test_parse_generate_response_malformed() {
        let err = parse_generate_response("not json").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        let err = parse_generate_response(r#"{"done":true}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let msg = error_message(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"error":"model 'x' not found"}"#,
        );
        assert_eq!(msg, "model 'x' not found");
        let msg = error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream");
        assert_eq!(msg, "HTTP 502 Bad Gateway: upstream");
    }

    #[test]
    fn test_generate_connection_refused_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let p = provider(&format!("http://127.0.0.1:{}/api/generate", port));
        let err = p.generate("Userhello\n").unwrap_err();
        assert!(matches!(err, Error::Network(_)), "got {:?}", err);
    }
}
