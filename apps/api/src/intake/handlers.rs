//! Axum route handlers for resume intake.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::intake::{read_resume, word_count};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeIntakeResponse {
    pub file_name: String,
    pub text: String,
    pub word_count: usize,
    pub message: String,
}

/// POST /api/v1/intake/resume
///
/// Multipart upload with a single `file` field (PDF or DOCX). Returns the
/// extracted text, to be passed back as `profile.experience` on generation.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeIntakeResponse>, AppError> {
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit, "Malformed upload"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, limit, "Failed to read upload"))?;

        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }

        let name = file_name.clone();
        let text = tokio::task::spawn_blocking(move || read_resume(&name, &bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume reader panicked: {e}")))??;

        let words = word_count(&text);
        info!("Loaded {words} words from {file_name}");

        return Ok(Json(ResumeIntakeResponse {
            message: format!("Loaded {words} words from {file_name}"),
            file_name,
            text,
            word_count: words,
        }));
    }

    Err(AppError::Validation(
        "Upload a PDF or DOCX in the `file` field".to_string(),
    ))
}

/// Body-limit rejections surface here as multipart errors; keep them 413.
fn upload_error(error: MultipartError, limit: usize, context: &str) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("{context}: {error}"))
    }
}
