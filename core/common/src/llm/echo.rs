//! Echo プロバイダの実装
//!
//! 推論サーバーを呼ばず、プロンプトの最終行をそのまま返す。
//! オフラインでの動作確認やテストに使う。

use crate::error::Error;
use crate::llm::provider::{GenerateReply, InferenceProvider};

/// Echo プロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl InferenceProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn generate(&self, prompt: &str) -> Result<GenerateReply, Error> {
        let last = prompt
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("");
        Ok(GenerateReply::new(
            format!("<think>echo provider: no model call</think>{}", last),
            true,
        ))
    }
}
