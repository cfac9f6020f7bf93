//! Share-by-email endpoint.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;

use super::super::error::ApiError;
use super::super::AppState;
use crate::email::{parse_recipient, DEFAULT_SUBJECT};

/// Form fields of `POST /share`.
#[derive(Debug, Deserialize)]
pub struct ShareForm {
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub summary: String,
}

/// Email a summary to a recipient.
pub async fn share(
    State(state): State<AppState>,
    form: Result<Form<ShareForm>, FormRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Form(form) = form?;
    parse_recipient(&form.email).map_err(ApiError::from_service)?;
    if form.summary.trim().is_empty() {
        return Err(ApiError::bad_request("Summary is required."));
    }

    let subject = form
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT);

    state
        .notifier
        .send_summary_email(form.email.trim(), subject, &form.summary)
        .await
        .map_err(|e| ApiError::from_service(e).context("Email failed: "))?;

    Ok(Json(serde_json::json!({ "message": "Email sent successfully" })))
}
