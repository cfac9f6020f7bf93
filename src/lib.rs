//! notetaker - meeting transcript summarization service.
//!
//! Sends transcripts to an OpenAI-compatible chat-completion endpoint and
//! emails the resulting notes through an SMTP relay.

pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod llm;
pub mod server;

pub use error::Error;
