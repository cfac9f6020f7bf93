//! Transcript summarization endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::error::ApiError;
use super::super::AppState;
use crate::error::Error;

/// Body of `POST /summarize`.
#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    pub transcript: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Summarize a transcript with the configured LLM.
pub async fn summarize(
    State(state): State<AppState>,
    body: Result<Json<SummarizeBody>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(body) = body?;
    let prompt = body.prompt.as_deref().unwrap_or_default();

    let summary = state
        .summarizer
        .summarize(&body.transcript, prompt)
        .await
        .map_err(|e| match e {
            Error::Configuration(_) => ApiError::from_service(e),
            other => ApiError::from_service(other).context("Summarization failed: "),
        })?;

    Ok(Json(SummarizeResponse { summary }))
}
