//! LLM integration for meeting summarization.
//!
//! Sends transcripts to an OpenAI-compatible chat-completion endpoint.

mod client;

pub use client::{
    build_user_prompt, LlmConfig, SummarizerClient, DEFAULT_INSTRUCTION, SYSTEM_PROMPT,
    TEMPERATURE,
};
