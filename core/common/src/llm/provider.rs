//! 推論プロバイダのトレイト定義

use crate::error::Error;
use serde::Deserialize;

/// generate 応答（`{"response": "...", "done": true}`）
///
/// 保存はしない。`response` から推論部分を取り除いたものだけが履歴に入る。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateReply {
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

impl GenerateReply {
    pub fn new(response: impl Into<String>, done: bool) -> Self {
        Self {
            response: response.into(),
            done,
        }
    }
}

/// 推論プロバイダのトレイト
///
/// 呼び出しはブロッキング。1 セッションで同時に 1 リクエストしか出さない。
pub trait InferenceProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// プロンプトを送り、応答を 1 件受け取る
    ///
    /// # Returns
    /// * `Ok(GenerateReply)` - デコード済みの応答
    /// * `Err(Error::Network)` - 接続失敗・非 2xx
    /// * `Err(Error::Decode)` - 応答 JSON が不正
    fn generate(&self, prompt: &str) -> Result<GenerateReply, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_done_defaults_to_false() {
        let r: GenerateReply = serde_json::from_str(r#"{"response":"hi"}"#).unwrap();
        assert_eq!(r, GenerateReply::new("hi", false));
    }

    #[test]
    fn test_reply_ignores_extra_fields() {
        let r: GenerateReply = serde_json::from_str(
            r#"{"model":"deepseek-r1:8b","created_at":"2025-01-01T00:00:00Z","response":"ok","done":true,"eval_count":3}"#,
        )
        .unwrap();
        assert_eq!(r, GenerateReply::new("ok", true));
    }
}
