//! LLM integration.
//!
//! Supports:
//! - **OpenAI-compatible**: any `/chat/completions` endpoint (OpenAI,
//!   Together, vLLM, ...)
//! - **Ollama**: local inference via `/api/chat`
//!
//! Both go through the reqwest-backed [`client`] module and are exposed to
//! the rest of the crate behind the [`LlmProvider`] trait.

pub mod client;
pub mod provider;

pub use client::{OllamaProvider, OpenAiCompatibleProvider};
pub use provider::*;

use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ConfigError, LlmError};

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAiCompatible,
    Ollama,
}

impl FromStr for LlmBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" | "openai-compatible" => Ok(Self::OpenAiCompatible),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::InvalidValue {
                key: "backend".to_string(),
                message: format!("unknown backend {other:?}, expected openai or ollama"),
            }),
        }
    }
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    /// Required for OpenAI-compatible endpoints, ignored by Ollama.
    pub api_key: Option<secrecy::SecretString>,
    pub model: String,
    pub base_url: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.backend {
        LlmBackend::OpenAiCompatible => {
            let api_key = config.api_key.clone().ok_or(LlmError::AuthFailed {
                provider: "openai-compatible".to_string(),
            })?;
            tracing::info!(
                model = %config.model,
                base_url = %config.base_url,
                "Using OpenAI-compatible backend"
            );
            Ok(Arc::new(OpenAiCompatibleProvider::new(
                &config.base_url,
                api_key,
                &config.model,
            )))
        }
        LlmBackend::Ollama => {
            tracing::info!(
                model = %config.model,
                base_url = %config.base_url,
                "Using Ollama backend"
            );
            Ok(Arc::new(OllamaProvider::new(&config.base_url, &config.model)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_known_names() {
        assert_eq!(
            "openai".parse::<LlmBackend>().unwrap(),
            LlmBackend::OpenAiCompatible
        );
        assert_eq!("Ollama".parse::<LlmBackend>().unwrap(), LlmBackend::Ollama);
        assert!("mystery".parse::<LlmBackend>().is_err());
    }

    #[test]
    fn create_provider_requires_key_for_openai() {
        let config = LlmConfig {
            backend: LlmBackend::OpenAiCompatible,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn create_provider_ollama_needs_no_key() {
        let config = LlmConfig {
            backend: LlmBackend::Ollama,
            api_key: None,
            model: "llama3".to_string(),
            base_url: "http://localhost:11434".to_string(),
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "llama3");
    }
}
