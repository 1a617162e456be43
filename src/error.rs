//! Error types for the assistant backend.

use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Link/title-extraction errors.
///
/// The public `fetch_title` helper swallows these into its raw-input
/// fallback; they surface only in logs.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error("No title element found in {url}")]
    NoTitle { url: String },
}

/// Process-wide resource errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("HTTP client construction failed: {0}")]
    ClientBuild(String),
}

/// Result type alias for the assistant backend.
pub type Result<T> = std::result::Result<T, Error>;
