//! Axum route handlers for document downloads.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{markdown_to_docx, DOCX_MIME, MARKDOWN_MIME};
use crate::models::DocumentKind;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Docx,
    Md,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: DownloadFormat,
}

#[derive(Debug, Deserialize)]
pub struct ExportDocxRequest {
    pub markdown: String,
    pub file_name: Option<String>,
}

/// GET /api/v1/packages/:id/documents/:kind?format=docx|md
pub async fn handle_download_document(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, DocumentKind)>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let package = state
        .packages
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Career package {id} not found")))?;

    let markdown = package.document(kind);
    match query.format {
        DownloadFormat::Md => Ok(attachment(
            MARKDOWN_MIME,
            &kind.markdown_file_name(),
            markdown.as_bytes().to_vec(),
        )),
        DownloadFormat::Docx => {
            let bytes = markdown_to_docx(markdown)?;
            let file_name = kind.docx_file_name(&package.target.title);
            info!(package_id = %id, file_name = %file_name, size = bytes.len(), "Exported document");
            Ok(attachment(DOCX_MIME, &file_name, bytes))
        }
    }
}

/// POST /api/v1/export/docx
///
/// Converts arbitrary Markdown (e.g. a document the user edited client-side).
pub async fn handle_export_docx(
    Json(request): Json<ExportDocxRequest>,
) -> Result<Response, AppError> {
    if request.markdown.trim().is_empty() {
        return Err(AppError::Validation("markdown cannot be empty".to_string()));
    }

    let bytes = markdown_to_docx(&request.markdown)?;
    let file_name = match request.file_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            if name.to_lowercase().ends_with(".docx") {
                name.to_string()
            } else {
                format!("{name}.docx")
            }
        }
        _ => "document.docx".to_string(),
    };

    Ok(attachment(DOCX_MIME, &file_name, bytes))
}

fn attachment(mime: &str, file_name: &str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", header_safe(file_name));
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// Drops characters that would break a quoted header parameter.
fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}
