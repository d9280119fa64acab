//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_package;
use crate::generation::keywords::{confirm_keywords, extract_keywords};
use crate::generation::validation::{require_valid_inputs, validate_years};
use crate::models::{CandidateProfile, CareerPackage, TargetPosition};
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub api_key: Option<String>,
    pub job_description: String,
    pub target_title: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePackageRequest {
    pub api_key: Option<String>,
    pub profile: CandidateProfile,
    pub target: TargetPosition,
    /// Keyword list as edited by the user; cleared entries are dropped.
    pub keywords: Vec<String>,
    pub extra_keyword: Option<String>,
}

fn header_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords
///
/// Validates the inputs and extracts the JD keywords for the user to review.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let api_key = state.effective_api_key(request.api_key.as_deref(), header_api_key(&headers));
    require_valid_inputs(api_key, &request.job_description, &request.target_title)?;

    let llm = state.llm_for(api_key)?;
    let keywords = extract_keywords(llm.as_ref(), &request.job_description).await?;

    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/packages
///
/// Confirms the keyword list and generates resume, cover letter and
/// interview prep. The package is kept in the in-memory store for download.
pub async fn handle_generate_package(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GeneratePackageRequest>,
) -> Result<(StatusCode, Json<CareerPackage>), AppError> {
    let api_key = state.effective_api_key(request.api_key.as_deref(), header_api_key(&headers));
    require_valid_inputs(
        api_key,
        &request.target.job_description,
        &request.target.title,
    )?;
    validate_years(request.profile.years_of_service)?;

    let keywords = confirm_keywords(&request.keywords, request.extra_keyword.as_deref())?;
    let llm = state.llm_for(api_key)?;

    let package = generate_package(llm.as_ref(), request.profile, request.target, keywords).await?;
    let stored = state.packages.insert(package).await;
    info!(
        "Stored career package {} ({} in memory)",
        stored.id,
        state.packages.len().await
    );

    Ok((StatusCode::CREATED, Json(CareerPackage::clone(&stored))))
}

/// GET /api/v1/packages/:id
pub async fn handle_get_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CareerPackage>, AppError> {
    let package = state
        .packages
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Career package {id} not found")))?;

    Ok(Json(CareerPackage::clone(&package)))
}

/// DELETE /api/v1/packages/:id
///
/// "Start over": forgets a generated package.
pub async fn handle_delete_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .packages
        .remove(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Career package {id} not found")))?;

    Ok(StatusCode::NO_CONTENT)
}
