//! LLM client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer token for the provider. Empty means summarization is disabled.
    pub api_key: String,
    /// Base URL without the `/v1/chat/completions` suffix
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Wall-clock limit for one completion call, in seconds
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Apply environment-style overrides from `lookup`.
    ///
    /// Supported variables:
    /// - `OPENAI_API_KEY`: API key (OpenAI, Groq, Together, ...)
    /// - `OPENAI_BASE_URL`: provider base URL, e.g. `https://api.groq.com/openai`
    /// - `OPENAI_MODEL`: model name
    /// - `OPENAI_TIMEOUT_SECS`: request timeout
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("OPENAI_API_KEY") {
            self.api_key = val;
        }
        if let Some(val) = lookup("OPENAI_BASE_URL") {
            self.base_url = val;
        }
        if let Some(val) = lookup("OPENAI_MODEL") {
            self.model = val;
        }
        if let Some(val) = lookup("OPENAI_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid OPENAI_TIMEOUT_SECS value: {}", val),
            }
        }
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Whether an API key has been provided.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
