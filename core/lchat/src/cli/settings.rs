//! 設定の解決（CLI フラグ → 環境変数 → 既定値）
//!
//! 環境変数は EnvResolver 経由でのみ読む。空文字列は未設定扱い。

use std::time::Duration;

use common::domain::{Endpoint, HistoryPath, ModelName};
use common::error::Error;
use common::llm::{ProviderKind, ProviderOptions};
use common::ports::outbound::EnvResolver;

use crate::cli::Config;
use crate::domain::PromptStyle;

/// 実行に必要な設定（解決済み）
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub provider: ProviderKind,
    pub provider_options: ProviderOptions,
    pub history_path: HistoryPath,
    pub prompt_style: PromptStyle,
    pub verbose: bool,
    pub new_chat: bool,
    pub show_reasoning: bool,
}

fn parse_timeout(raw: &str) -> Result<Duration, Error> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::invalid_argument(format!(
            "Invalid timeout: {} (expected a positive number of seconds)",
            raw
        ))),
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Config と環境変数から Settings を組み立てる
pub fn resolve_settings(config: &Config, env: &dyn EnvResolver) -> Result<Settings, Error> {
    let pick = |flag: &Option<String>, key: &str| {
        flag.clone()
            .filter(|s| !s.is_empty())
            .or_else(|| env.var(key))
    };

    let provider = match pick(&config.provider, "LCHAT_PROVIDER") {
        Some(name) => name.parse::<ProviderKind>()?,
        None => ProviderKind::default(),
    };
    let endpoint = pick(&config.endpoint, "LCHAT_ENDPOINT")
        .map(Endpoint::new)
        .unwrap_or_default();
    let model = pick(&config.model, "LCHAT_MODEL")
        .map(ModelName::new)
        .unwrap_or_default();
    let timeout = pick(&config.timeout, "LCHAT_TIMEOUT")
        .map(|raw| parse_timeout(&raw))
        .transpose()?;
    let history_path = pick(&config.history_file, "LCHAT_HISTORY")
        .map(HistoryPath::new)
        .unwrap_or_default();
    let legacy = config.legacy_prompt
        || env
            .var("LCHAT_LEGACY_PROMPT")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

    Ok(Settings {
        provider,
        provider_options: ProviderOptions {
            endpoint,
            model,
            timeout,
        },
        history_path,
        prompt_style: if legacy {
            PromptStyle::Legacy
        } else {
            PromptStyle::Labeled
        },
        verbose: config.verbose,
        new_chat: config.new_chat,
        show_reasoning: config.show_reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvResolver for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0
                .get(key)
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> MapEnv {
        MapEnv(pairs.iter().copied().collect())
    }

    #[test]
    fn test_defaults() {
        let s = resolve_settings(&Config::default(), &env(&[])).unwrap();
        assert_eq!(s.provider, ProviderKind::Ollama);
        assert_eq!(
            s.provider_options.endpoint.as_str(),
            "http://localhost:11434/api/generate"
        );
        assert_eq!(&*s.provider_options.model, "deepseek-r1:8b");
        assert_eq!(s.provider_options.timeout, None);
        assert_eq!(s.history_path.as_path(), Path::new("chat_log.json"));
        assert_eq!(s.prompt_style, PromptStyle::Labeled);
    }

    #[test]
    fn test_env_overrides_default() {
        let s = resolve_settings(
            &Config::default(),
            &env(&[
                ("LCHAT_MODEL", "qwen3:4b"),
                ("LCHAT_ENDPOINT", "http://gpu-box:11434/api/generate"),
                ("LCHAT_HISTORY", "/var/tmp/h.json"),
                ("LCHAT_TIMEOUT", "15"),
                ("LCHAT_PROVIDER", "echo"),
                ("LCHAT_LEGACY_PROMPT", "yes"),
            ]),
        )
        .unwrap();
        assert_eq!(&*s.provider_options.model, "qwen3:4b");
        assert_eq!(
            s.provider_options.endpoint.as_str(),
            "http://gpu-box:11434/api/generate"
        );
        assert_eq!(s.history_path.as_path(), Path::new("/var/tmp/h.json"));
        assert_eq!(s.provider_options.timeout, Some(Duration::from_secs(15)));
        assert_eq!(s.provider, ProviderKind::Echo);
        assert_eq!(s.prompt_style, PromptStyle::Legacy);
    }

    #[test]
    fn test_flag_overrides_env() {
        let config = Config {
            model: Some("llama3:8b".to_string()),
            ..Default::default()
        };
        let s = resolve_settings(&config, &env(&[("LCHAT_MODEL", "qwen3:4b")])).unwrap();
        assert_eq!(&*s.provider_options.model, "llama3:8b");
    }

    #[test]
    fn test_empty_env_is_unset() {
        let s = resolve_settings(&Config::default(), &env(&[("LCHAT_MODEL", "")])).unwrap();
        assert_eq!(&*s.provider_options.model, "deepseek-r1:8b");
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["abc", "0", "-3"] {
            let config = Config {
                timeout: Some(bad.to_string()),
                ..Default::default()
            };
            let err = resolve_settings(&config, &env(&[])).unwrap_err();
            assert!(err.is_usage(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_unknown_provider() {
        let err = resolve_settings(&Config::default(), &env(&[("LCHAT_PROVIDER", "gpt")]))
            .unwrap_err();
        assert!(err.is_usage());
    }
}
