//! Configuration types.

use crate::error::ConfigError;
use crate::llm::LlmBackend;

/// Default variable marker — `.alert 10:00` binds `alert = 10:00`.
pub const DEFAULT_VAR_MARKER: char = '.';
/// Default flag marker — `-urgent` is appended to flags as-is.
pub const DEFAULT_FLAG_MARKER: char = '-';

/// Marker characters the directive parser recognizes.
///
/// Kept as configuration rather than literals so deployments can move to a
/// different prefix pairing without touching the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveConfig {
    /// Prefix of a token whose stripped name keys `variables`, paired with
    /// the following token as its value.
    pub var_marker: char,
    /// Prefix of a standalone token appended to `flags`.
    pub flag_marker: char,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            var_marker: DEFAULT_VAR_MARKER,
            flag_marker: DEFAULT_FLAG_MARKER,
        }
    }
}

/// Top-level assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Assistant name for identification.
    pub name: String,
    /// LLM backend to route chat completions to.
    pub backend: LlmBackend,
    /// Model identifier passed through to the backend.
    pub model: String,
    /// Base URL of the completion API.
    pub base_url: String,
    /// Directive marker characters.
    pub directives: DirectiveConfig,
    /// Seconds a cached link title stays fresh.
    pub link_cache_ttl_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "chat-directives".to_string(),
            backend: LlmBackend::OpenAiCompatible,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            directives: DirectiveConfig::default(),
            link_cache_ttl_secs: 900,
        }
    }
}

impl AssistantConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// `CHAT_DIRECTIVES_VAR_MARKER` / `CHAT_DIRECTIVES_FLAG_MARKER` must be
    /// single characters when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("CHAT_DIRECTIVES_NAME") {
            config.name = name;
        }
        if let Ok(backend) = std::env::var("CHAT_DIRECTIVES_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Ok(model) = std::env::var("CHAT_DIRECTIVES_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("CHAT_DIRECTIVES_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(raw) = std::env::var("CHAT_DIRECTIVES_VAR_MARKER") {
            config.directives.var_marker = parse_marker("CHAT_DIRECTIVES_VAR_MARKER", &raw)?;
        }
        if let Ok(raw) = std::env::var("CHAT_DIRECTIVES_FLAG_MARKER") {
            config.directives.flag_marker = parse_marker("CHAT_DIRECTIVES_FLAG_MARKER", &raw)?;
        }
        if let Ok(raw) = std::env::var("CHAT_DIRECTIVES_LINK_TTL_SECS") {
            config.link_cache_ttl_secs = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CHAT_DIRECTIVES_LINK_TTL_SECS".to_string(),
                message: format!("expected seconds as an integer, got {raw:?}"),
            })?;
        }

        Ok(config)
    }
}

fn parse_marker(key: &str, raw: &str) -> Result<char, ConfigError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("marker must be a single character, got {raw:?}"),
        }),
    }
}
