//! Keyword extraction ("Mirror Protocol"): the LLM pulls the 10-15 JD
//! requirements the documents must mirror, the user edits them, and the
//! confirmed list drives generation.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::context::keywords_prompt;
use crate::llm_client::TextGenerator;

/// Fewer than this and the extraction is treated as a failure.
const MIN_EXTRACTED_KEYWORDS: usize = 3;

/// Asks the LLM for the most important JD keywords, most critical first.
pub async fn extract_keywords(
    llm: &dyn TextGenerator,
    job_description: &str,
) -> Result<Vec<String>, AppError> {
    let raw = llm
        .generate(&keywords_prompt(job_description))
        .await
        .map_err(|e| AppError::Llm(format!("Keyword extraction failed: {e}")))?;

    let keywords = parse_keywords(&raw)?;
    info!("Extracted {} JD keywords", keywords.len());
    Ok(keywords)
}

/// Parses the model's JSON array, dropping blank entries. Numbers and
/// booleans are kept as text; nulls and nested values are skipped.
pub fn parse_keywords(raw: &str) -> Result<Vec<String>, AppError> {
    let parsed: Vec<Value> = serde_json::from_str(raw).map_err(|_| AppError::KeywordParse)?;

    let keywords: Vec<String> = parsed
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.len() < MIN_EXTRACTED_KEYWORDS {
        return Err(AppError::Llm(
            "Keyword extraction failed: Too few keywords returned.".to_string(),
        ));
    }
    Ok(keywords)
}

/// Applies the user's edits: trims, drops cleared entries, appends the extra
/// keyword when one was typed.
pub fn confirm_keywords(edited: &[String], extra: Option<&str>) -> Result<Vec<String>, AppError> {
    let mut confirmed: Vec<String> = edited
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();

    if let Some(extra) = extra.map(str::trim).filter(|k| !k.is_empty()) {
        confirmed.push(extra.to_string());
    }

    if confirmed.is_empty() {
        return Err(AppError::Validation(
            "At least one keyword is required.".to_string(),
        ));
    }
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct CannedLlm(&'static str);

    #[async_trait]
    impl TextGenerator for CannedLlm {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            assert!(prompt.contains("JOB DESCRIPTION:"));
            Ok(self.0.to_string())
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl TextGenerator for FailingLlm {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[test]
    fn test_parse_keywords_trims_and_drops_blanks() {
        let kws = parse_keywords(r#"[" SAP ERP ", "", "Vendor Negotiation", "Customer Service"]"#)
            .unwrap();
        assert_eq!(kws, vec!["SAP ERP", "Vendor Negotiation", "Customer Service"]);
    }

    #[test]
    fn test_parse_keywords_keeps_scalar_items_as_text() {
        let kws = parse_keywords(r#"["SAP", 5, "Excel", null, "Lean", ["nested"], true]"#).unwrap();
        assert_eq!(kws, vec!["SAP", "5", "Excel", "Lean", "true"]);
    }

    #[test]
    fn test_parse_keywords_rejects_non_json() {
        let err = parse_keywords("Here are the keywords: SAP, Excel").unwrap_err();
        assert!(matches!(err, AppError::KeywordParse));
    }

    #[test]
    fn test_parse_keywords_rejects_object() {
        let err = parse_keywords(r#"{"keywords": ["a", "b", "c"]}"#).unwrap_err();
        assert!(matches!(err, AppError::KeywordParse));
    }

    #[test]
    fn test_parse_keywords_requires_three() {
        let err = parse_keywords(r#"["SAP", "Excel"]"#).unwrap_err();
        match err {
            AppError::Llm(msg) => assert!(msg.contains("Too few keywords returned.")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_confirm_keywords_applies_edits_and_extra() {
        let edited = vec![
            "Supply Chain Management".to_string(),
            "   ".to_string(),
            " SAP ERP".to_string(),
        ];
        let confirmed = confirm_keywords(&edited, Some(" Lean Six Sigma ")).unwrap();
        assert_eq!(
            confirmed,
            vec!["Supply Chain Management", "SAP ERP", "Lean Six Sigma"]
        );
    }

    #[test]
    fn test_confirm_keywords_ignores_blank_extra() {
        let edited = vec!["SAP ERP".to_string()];
        assert_eq!(confirm_keywords(&edited, Some("  ")).unwrap(), vec!["SAP ERP"]);
    }

    #[test]
    fn test_confirm_keywords_rejects_empty_list() {
        let edited = vec![" ".to_string()];
        assert!(matches!(
            confirm_keywords(&edited, None),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_keywords_with_canned_model() {
        let llm = CannedLlm(r#"["Inventory Control", "SAP ERP", "Customer Service", "Auditing"]"#);
        let kws = extract_keywords(&llm, "Inventory analyst JD").await.unwrap();
        assert_eq!(kws.len(), 4);
        assert_eq!(kws[0], "Inventory Control");
    }

    #[tokio::test]
    async fn test_extract_keywords_surfaces_llm_failure() {
        let err = extract_keywords(&FailingLlm, "JD").await.unwrap_err();
        match err {
            AppError::Llm(msg) => assert!(msg.starts_with("Keyword extraction failed:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
