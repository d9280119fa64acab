use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{CandidateProfile, TargetPosition};

/// One of the three documents in a career package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    InterviewPrep,
}

impl DocumentKind {
    pub fn display_name(self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover Letter",
            DocumentKind::InterviewPrep => "Interview Prep",
        }
    }

    /// Prefix used for download file names.
    pub fn file_stem(self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover_Letter",
            DocumentKind::InterviewPrep => "Interview_Prep",
        }
    }

    /// `Resume_Procurement_Buyer_II.docx` style name for the Word download.
    pub fn docx_file_name(self, target_title: &str) -> String {
        format!(
            "{}_{}.docx",
            self.file_stem(),
            target_title.trim().replace(' ', "_")
        )
    }

    pub fn markdown_file_name(self) -> String {
        format!("{}.md", self.file_stem())
    }
}

/// Resume, cover letter and interview prep generated for one target position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPackage {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: CandidateProfile,
    pub target: TargetPosition,
    /// Confirmed JD keywords the documents were asked to mirror.
    pub keywords: Vec<String>,
    pub resume_md: String,
    pub cover_letter_md: String,
    pub interview_md: String,
}

impl CareerPackage {
    pub fn document(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Resume => &self.resume_md,
            DocumentKind::CoverLetter => &self.cover_letter_md,
            DocumentKind::InterviewPrep => &self.interview_md,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_file_name_replaces_spaces() {
        assert_eq!(
            DocumentKind::Resume.docx_file_name("Procurement Buyer II"),
            "Resume_Procurement_Buyer_II.docx"
        );
        assert_eq!(
            DocumentKind::CoverLetter.docx_file_name("Analyst"),
            "Cover_Letter_Analyst.docx"
        );
    }

    #[test]
    fn test_markdown_file_name() {
        assert_eq!(
            DocumentKind::InterviewPrep.markdown_file_name(),
            "Interview_Prep.md"
        );
    }

    #[test]
    fn test_document_kind_serde_is_snake_case() {
        let kind: DocumentKind = serde_json::from_str(r#""cover_letter""#).unwrap();
        assert_eq!(kind, DocumentKind::CoverLetter);
    }
}
