//! プロバイダ種別と生成

use crate::domain::{Endpoint, ModelName};
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::ollama::OllamaProvider;
use crate::llm::provider::InferenceProvider;
use crate::ports::outbound::Log;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// プロバイダ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Ollama,
    Echo,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::Echo => "echo",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "echo" => Ok(ProviderKind::Echo),
            other => Err(Error::invalid_argument(format!(
                "Unknown provider: {} (expected ollama or echo)",
                other
            ))),
        }
    }
}

/// プロバイダ生成に必要な設定
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub endpoint: Endpoint,
    pub model: ModelName,
    pub timeout: Option<Duration>,
}

/// 種別に応じたプロバイダを作成
pub fn create_provider(
    kind: ProviderKind,
    options: &ProviderOptions,
    log: Arc<dyn Log>,
) -> Result<Arc<dyn InferenceProvider>, Error> {
    match kind {
        ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::new(
            options.endpoint.clone(),
            options.model.clone(),
            options.timeout,
            log,
        )?)),
        ProviderKind::Echo => Ok(Arc::new(EchoProvider::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::NoopLog;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("ollama".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);
        assert_eq!("ECHO".parse::<ProviderKind>().unwrap(), ProviderKind::Echo);
        let err = "gemini".parse::<ProviderKind>().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_create_provider() {
        let options = ProviderOptions::default();
        let p = create_provider(ProviderKind::Ollama, &options, Arc::new(NoopLog)).unwrap();
        assert_eq!(p.name(), "ollama");
        let p = create_provider(ProviderKind::Echo, &options, Arc::new(NoopLog)).unwrap();
        assert_eq!(p.name(), "echo");
    }
}
