//! Input checks run before any LLM call.

use crate::errors::AppError;
use crate::models::profile::{MAX_YEARS_OF_SERVICE, MIN_YEARS_OF_SERVICE};

const MIN_JD_WORDS: usize = 15;
const MIN_TITLE_CHARS: usize = 3;

/// Returns the first failing rule as a user-facing message, or `None`.
pub fn validate_inputs(
    api_key: Option<&str>,
    job_description: &str,
    target_title: &str,
) -> Option<&'static str> {
    if api_key.map_or(true, |k| k.trim().is_empty()) {
        return Some("API Key is required.");
    }
    if job_description.split_whitespace().count() < MIN_JD_WORDS {
        return Some("Job Description is too short. Paste the full JD (minimum ~15 words).");
    }
    if target_title.trim().chars().count() < MIN_TITLE_CHARS {
        return Some("Target Job Title is required.");
    }
    None
}

/// `validate_inputs` as a `Result`, for handlers.
pub fn require_valid_inputs(
    api_key: Option<&str>,
    job_description: &str,
    target_title: &str,
) -> Result<(), AppError> {
    match validate_inputs(api_key, job_description, target_title) {
        Some(msg) => Err(AppError::Validation(msg.to_string())),
        None => Ok(()),
    }
}

pub fn validate_years(years: u8) -> Result<(), AppError> {
    if (MIN_YEARS_OF_SERVICE..=MAX_YEARS_OF_SERVICE).contains(&years) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Years of Service must be between {MIN_YEARS_OF_SERVICE} and {MAX_YEARS_OF_SERVICE}."
        )))
    }
}
