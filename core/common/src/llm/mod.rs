//! 推論サーバープロバイダ
//!
//! 組み立てたプロンプトを推論サーバーへ送り、非ストリーミングの応答 1 件を受け取る。

pub mod echo;
pub mod factory;
pub mod ollama;
pub mod provider;

pub use echo::EchoProvider;
pub use factory::{create_provider, ProviderKind, ProviderOptions};
pub use ollama::OllamaProvider;
pub use provider::{GenerateReply, InferenceProvider};
