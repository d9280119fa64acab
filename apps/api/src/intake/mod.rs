//! Resume intake: pulls plain text out of an uploaded PDF or DOCX so it can
//! be used as the candidate's raw experience data.

pub mod docx;
pub mod handlers;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("PDF appears to be scanned/image-only. No extractable text found.")]
    ScannedPdf,

    #[error("DOCX file appears empty.")]
    EmptyDocx,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

/// Supported upload formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    pub fn from_file_name(file_name: &str) -> Result<Self, IntakeError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(ResumeFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(ResumeFormat::Docx)
        } else {
            Err(IntakeError::UnsupportedType(file_name.to_string()))
        }
    }
}

/// Extracts trimmed text from a resume file. CPU-bound; call from
/// `spawn_blocking` in async contexts.
pub fn read_resume(file_name: &str, bytes: &[u8]) -> Result<String, IntakeError> {
    match ResumeFormat::from_file_name(file_name)? {
        ResumeFormat::Pdf => {
            let text = pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| IntakeError::Pdf(e.to_string()))?;
            let text = text.trim();
            if text.is_empty() {
                return Err(IntakeError::ScannedPdf);
            }
            Ok(text.to_string())
        }
        ResumeFormat::Docx => {
            let text = docx::extract_text(bytes)?;
            let text = text.trim();
            if text.is_empty() {
                return Err(IntakeError::EmptyDocx);
            }
            Ok(text.to_string())
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(ResumeFormat::from_file_name("NCOER.PDF").unwrap(), ResumeFormat::Pdf);
        assert_eq!(
            ResumeFormat::from_file_name("resume.Docx").unwrap(),
            ResumeFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_type_names_the_file() {
        let err = read_resume("resume.txt", b"hello").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type: resume.txt");
    }

    #[test]
    fn test_legacy_doc_is_unsupported() {
        assert!(matches!(
            ResumeFormat::from_file_name("resume.doc"),
            Err(IntakeError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_garbage_pdf_is_an_error() {
        let err = read_resume("resume.pdf", b"not a pdf").unwrap_err();
        assert!(matches!(err, IntakeError::Pdf(_) | IntakeError::ScannedPdf));
    }

    #[test]
    fn test_docx_round_trip_through_reader() {
        let bytes = docx::tests::docx_with_paragraphs(&[
            "SSG Jane Doe",
            "Maintained 100% accountability of $15M property book",
        ]);
        let text = read_resume("resume.docx", &bytes).unwrap();
        assert_eq!(
            text,
            "SSG Jane Doe\nMaintained 100% accountability of $15M property book"
        );
        assert_eq!(word_count(&text), 10);
    }

    #[test]
    fn test_docx_without_text_is_empty() {
        let bytes = docx::tests::docx_with_paragraphs(&["", "   "]);
        let err = read_resume("blank.docx", &bytes).unwrap_err();
        assert_eq!(err.to_string(), "DOCX file appears empty.");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  Maintained   100% accountability\n of gear "), 5);
    }
}
