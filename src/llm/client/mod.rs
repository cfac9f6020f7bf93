//! Client for OpenAI-compatible chat-completion endpoints.
//!
//! Works with OpenAI (default base URL) and any provider exposing the same
//! `/v1/chat/completions` contract, such as Groq or Together.

mod config;
mod prompts;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, UpstreamError};

pub use config::LlmConfig;
pub use prompts::{build_user_prompt, DEFAULT_INSTRUCTION, SYSTEM_PROMPT};

/// Sampling temperature for summaries.
pub const TEMPERATURE: f32 = 0.2;

/// Summarization client. Configuration is fixed at construction.
pub struct SummarizerClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

/// Chat-completion request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completion response format (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl SummarizerClient {
    /// Create a client from configuration.
    pub fn new(config: &LlmConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            api_key: config.api_key.trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the completion endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Summarize a transcript, optionally steered by a custom instruction.
    pub async fn summarize(&self, transcript: &str, custom_prompt: &str) -> Result<String, Error> {
        if self.api_key.is_empty() {
            return Err(Error::configuration(
                "OPENAI_API_KEY missing. Configure env vars.",
            ));
        }
        if transcript.trim().is_empty() {
            return Err(Error::validation("Transcript is required."));
        }

        let user_prompt = build_user_prompt(transcript, custom_prompt);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        info!(
            "Summarizing transcript ({} chars) with {}",
            transcript.trim().chars().count(),
            self.model
        );
        let summary = self.call_chat_completions(&request).await?;
        debug!("Received summary ({} chars)", summary.chars().count());
        Ok(summary)
    }

    /// POST the request and extract `choices[0].message.content`.
    async fn call_chat_completions(
        &self,
        request: &ChatRequest<'_>,
    ) -> Result<String, UpstreamError> {
        let url = self.completions_url();
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Chat completion returned HTTP {}", status);
            return Err(UpstreamError::Status { status, url, body });
        }

        let body = resp
            .text()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.clone(),
                source,
            })?;

        extract_content(&body)
    }
}

/// Pull the first choice's content out of a chat-completion response body.
fn extract_content(body: &str) -> Result<String, UpstreamError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(UpstreamError::MalformedResponse)?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(UpstreamError::EmptyChoices)
}
