//! Error types shared by the summarization client and the email notifier.
//!
//! Every failure falls into one of four kinds. The HTTP layer maps them to
//! status codes in `server::error`.

use std::fmt;

use thiserror::Error;

/// Boxed error used for causes coming out of pluggable transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for summarize and share operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required secret or credential is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The caller supplied unusable input.
    #[error("{0}")]
    Validation(String),

    /// The LLM provider could not produce a summary.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The SMTP transaction failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Failures talking to the chat-completion endpoint.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{}", describe_transport(.url, .source))]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("malformed response: no choices returned")]
    EmptyChoices,
}

fn describe_transport(url: &str, source: &reqwest::Error) -> String {
    if source.is_timeout() {
        format!("request to {} timed out: {}", url, source)
    } else {
        format!("request to {} failed: {}", url, source)
    }
}

/// Step of the SMTP session that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpStage {
    Connect,
    StartTls,
    Authenticate,
    Send,
}

impl fmt::Display for SmtpStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SmtpStage::Connect => "connect",
            SmtpStage::StartTls => "STARTTLS",
            SmtpStage::Authenticate => "authentication",
            SmtpStage::Send => "send",
        };
        f.write_str(name)
    }
}

/// An SMTP step failed; the transport's error is kept as the source.
#[derive(Debug, Error)]
#[error("SMTP {stage} failed: {source}")]
pub struct DeliveryError {
    pub stage: SmtpStage,
    #[source]
    pub source: BoxError,
}

impl DeliveryError {
    pub fn new(stage: SmtpStage, source: impl Into<BoxError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}
