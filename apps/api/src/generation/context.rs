//! Prompt assembly: candidate profile + target position + knowledge base +
//! confirmed keywords, rendered into one prompt per document.

use crate::generation::ghostwriter::skill_lines;
use crate::generation::prompts::{
    CONTEXT_BLOCK_TEMPLATE, COVER_LETTER_PROMPT_TEMPLATE, INTERVIEW_PROMPT_TEMPLATE,
    KEYWORDS_PROMPT_TEMPLATE, NO_DATA_TEMPLATE, RESUME_PROMPT_TEMPLATE,
};
use crate::generation::tone::tone_guide;
use crate::generation::translation::translation_lines;
use crate::llm_client::prompts::{render_template, JSON_ARRAY_ONLY, NO_PREAMBLE};
use crate::models::{CandidateProfile, DocumentKind, TargetPosition};

/// Experience text beyond this many characters is cut before prompting.
pub const MAX_EXPERIENCE_CHARS: usize = 4000;

/// Everything a document prompt is built from.
pub struct PromptContext<'a> {
    pub profile: &'a CandidateProfile,
    pub target: &'a TargetPosition,
    pub keywords: &'a [String],
}

impl<'a> PromptContext<'a> {
    pub fn new(
        profile: &'a CandidateProfile,
        target: &'a TargetPosition,
        keywords: &'a [String],
    ) -> Self {
        Self {
            profile,
            target,
            keywords,
        }
    }

    /// The candidate's experience, or the generate-from-scratch instruction.
    pub fn experience(&self) -> String {
        match self.profile.experience_text() {
            Some(text) => truncate_chars(text, MAX_EXPERIENCE_CHARS).to_string(),
            None => {
                let years = self.profile.years_of_service.to_string();
                render_template(
                    NO_DATA_TEMPLATE,
                    &[("rank", self.profile.rank.label()), ("years", &years)],
                )
            }
        }
    }

    pub fn context_block(&self) -> String {
        let rank = self.profile.rank;
        let years = self.profile.years_of_service.to_string();
        let experience = self.experience();
        let keywords = numbered_keywords(self.keywords);
        let translations = translation_lines();
        let ghostwriter = skill_lines(rank);

        render_template(
            CONTEXT_BLOCK_TEMPLATE,
            &[
                ("rank", rank.label()),
                ("years", &years),
                ("experience", &experience),
                ("title", self.target.title.trim()),
                ("industry", self.target.industry.label()),
                ("tone", tone_guide(self.target.industry).guidance),
                ("keywords", &keywords),
                ("translations", &translations),
                ("rank_code", rank.code()),
                ("ghostwriter", &ghostwriter),
            ],
        )
    }

    /// Builds the generation prompt for one document.
    pub fn document_prompt(&self, kind: DocumentKind) -> String {
        let context = self.context_block();
        match kind {
            DocumentKind::Resume => render_template(
                RESUME_PROMPT_TEMPLATE,
                &[
                    ("context", &context),
                    ("title", self.target.title.trim()),
                    ("rank", self.profile.rank.label()),
                    (
                        "project_header",
                        tone_guide(self.target.industry).project_header,
                    ),
                    ("no_preamble", NO_PREAMBLE),
                ],
            ),
            DocumentKind::CoverLetter => render_template(
                COVER_LETTER_PROMPT_TEMPLATE,
                &[("context", &context), ("no_preamble", NO_PREAMBLE)],
            ),
            DocumentKind::InterviewPrep => render_template(
                INTERVIEW_PROMPT_TEMPLATE,
                &[("context", &context), ("no_preamble", NO_PREAMBLE)],
            ),
        }
    }
}

pub fn keywords_prompt(job_description: &str) -> String {
    render_template(
        KEYWORDS_PROMPT_TEMPLATE,
        &[
            ("json_array_only", JSON_ARRAY_ONLY),
            ("job_description", job_description),
        ],
    )
}

/// `  1. Keyword` lines, in confirmed order.
fn numbered_keywords(keywords: &[String]) -> String {
    keywords
        .iter()
        .enumerate()
        .map(|(i, k)| format!("  {}. {}", i + 1, k))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cuts `text` to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
