//! HTTP-backed providers for OpenAI-compatible and Ollama endpoints.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRIES: u32 = 2;

/// Provider for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiCompatibleProvider {
    http: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(base_url: &str, api_key: SecretString, model: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
        });
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        let payload = send_with_retry(|| {
            self.http
                .post(&url)
                .bearer_auth(self.api_key.expose_secret())
                .json(&body)
                .timeout(REQUEST_TIMEOUT)
        })
        .await
        .map_err(|reason| LlmError::RequestFailed {
            provider: "openai-compatible".to_string(),
            reason,
        })?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "openai-compatible".to_string(),
                reason: "missing choices[0].message.content".to_string(),
            })?
            .to_string();

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            input_tokens: payload["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
            output_tokens: payload["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider for a local Ollama server's `/api/chat` endpoint.
pub struct OllamaProvider {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/api/chat", self.base_url);
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
        });
        if let Some(temperature) = request.temperature {
            body["options"]["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            body["options"]["num_predict"] = json!(max_tokens);
        }

        let payload = send_with_retry(|| self.http.post(&url).json(&body).timeout(REQUEST_TIMEOUT))
            .await
            .map_err(|reason| LlmError::RequestFailed {
                provider: "ollama".to_string(),
                reason,
            })?;

        let content = payload["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "ollama".to_string(),
                reason: "missing message.content".to_string(),
            })?
            .to_string();

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            input_tokens: payload["prompt_eval_count"].as_u64().unwrap_or(0) as u32,
            output_tokens: payload["eval_count"].as_u64().unwrap_or(0) as u32,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// POST with bounded retry on transport errors and non-success statuses.
async fn send_with_retry<F>(build: F) -> Result<serde_json::Value, String>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            debug!(attempt, "Retrying LLM call");
        }
        match build().send().await {
            Ok(resp) if resp.status().is_success() => {
                return resp.json().await.map_err(|e| e.to_string());
            }
            Ok(resp) => {
                let status = resp.status();
                last_error = format!("HTTP {}: {}", status, resp.text().await.unwrap_or_default());
                warn!(%status, "LLM endpoint returned error");
                // Client errors won't improve with retries.
                if status.is_client_error() {
                    break;
                }
            }
            Err(e) => {
                last_error = e.to_string();
                warn!(error = %last_error, "LLM request failed");
            }
        }
    }
    Err(last_error)
}
