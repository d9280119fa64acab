//! Career package generation: orchestrates the three document calls.
//!
//! Flow: build prompt context → resume / cover letter / interview prep LLM
//! calls (concurrently) → assemble `CareerPackage`.
//!
//! The package is all-or-nothing: one failed document fails the whole request.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::context::PromptContext;
use crate::llm_client::TextGenerator;
use crate::models::{CandidateProfile, CareerPackage, DocumentKind, TargetPosition};

/// Generates resume, cover letter and interview prep for one target position.
pub async fn generate_package(
    llm: &dyn TextGenerator,
    profile: CandidateProfile,
    target: TargetPosition,
    keywords: Vec<String>,
) -> Result<CareerPackage, AppError> {
    let ctx = PromptContext::new(&profile, &target, &keywords);

    info!(
        "Generating career package: rank={}, industry={}, title={:?}, keywords={}, has_experience={}",
        profile.rank.code(),
        target.industry,
        target.title,
        keywords.len(),
        profile.experience_text().is_some()
    );

    let (resume_md, cover_letter_md, interview_md) = tokio::try_join!(
        generate_document(llm, &ctx, DocumentKind::Resume),
        generate_document(llm, &ctx, DocumentKind::CoverLetter),
        generate_document(llm, &ctx, DocumentKind::InterviewPrep),
    )?;

    let package = CareerPackage {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        profile,
        target,
        keywords,
        resume_md,
        cover_letter_md,
        interview_md,
    };

    info!("Career package {} complete", package.id);
    Ok(package)
}

async fn generate_document(
    llm: &dyn TextGenerator,
    ctx: &PromptContext<'_>,
    kind: DocumentKind,
) -> Result<String, AppError> {
    info!("Generating {}...", kind.display_name());
    let prompt = ctx.document_prompt(kind);

    let text = llm.generate(&prompt).await.map_err(|e| {
        AppError::Llm(format!(
            "Generation failed ({}): {e}",
            kind.display_name()
        ))
    })?;

    info!("{} generated ({} chars)", kind.display_name(), text.len());
    Ok(text)
}
