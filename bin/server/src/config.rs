//! Centralized server configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables, e.g. `LISTEN_ADDR`, `LLM__BASE_URL`, `LLM__MODEL`,
//! `LLM__API_KEY`.

use serde::Deserialize;
use std::time::Duration;
use top_songs_ai::OpenAiConfig;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// API key, if the provider requires one.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sampling temperature. Left to the provider's default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            temperature: None,
        }
    }
}

impl LlmConfig {
    /// Builds the backend configuration for this provider.
    #[must_use]
    pub fn backend_config(&self) -> OpenAiConfig {
        let mut config = OpenAiConfig::new(self.base_url.clone(), self.model.clone())
            .with_timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(ref api_key) = self.api_key {
            config = config.with_api_key(api_key.clone());
        }
        config
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if present configuration values fail to parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_config_has_correct_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.api_key.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn backend_config_carries_key_and_timeout() {
        let config = LlmConfig {
            api_key: Some("sk-test".to_string()),
            timeout_seconds: 5,
            ..LlmConfig::default()
        };

        let backend = config.backend_config();
        assert_eq!(backend.api_key.as_deref(), Some("sk-test"));
        assert_eq!(backend.timeout, Duration::from_secs(5));
        assert_eq!(backend.model, "gpt-4o-mini");
    }
}
