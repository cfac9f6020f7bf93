//! Transcript ingestion endpoints.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::FormRejection;
use axum::extract::Multipart;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::error::ApiError;

/// Form fields of `POST /upload-text`.
#[derive(Debug, Deserialize)]
pub struct UploadTextForm {
    pub transcript: String,
}

/// Response of `POST /upload-file`.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    pub filename: String,
    pub content: String,
}

/// Accept a pasted transcript and report its length.
pub async fn upload_text(
    form: Result<Form<UploadTextForm>, FormRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Form(form) = form?;
    if form.transcript.trim().is_empty() {
        return Err(ApiError::bad_request("Transcript is empty."));
    }
    Ok(Json(serde_json::json!({
        "ok": true,
        "length": form.transcript.chars().count(),
    })))
}

/// Accept a `.txt` file and return its text so the UI can edit it.
pub async fn upload_file(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadedFile>, ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_text_file(&filename) {
            return Err(ApiError::bad_request("Only .txt files are supported."));
        }

        let bytes = field.bytes().await?;
        debug!("Received upload {} ({} bytes)", filename, bytes.len());

        return Ok(Json(UploadedFile {
            filename,
            content: decode_utf8_ignoring_invalid(&bytes),
        }));
    }

    Err(ApiError::unprocessable("Missing 'file' field."))
}

fn is_text_file(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".txt")
}

/// Decode UTF-8, dropping byte sequences that are not valid.
fn decode_utf8_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
