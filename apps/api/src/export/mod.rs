//! Export: turns generated Markdown into a formatted Word document.

pub mod docx;
pub mod handlers;
pub mod markdown;

use thiserror::Error;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MARKDOWN_MIME: &str = "text/markdown; charset=utf-8";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to write DOCX part: {0}")]
    Io(#[from] std::io::Error),
}

/// Markdown in, `.docx` bytes out.
pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>, ExportError> {
    let blocks = markdown::parse_blocks(markdown);
    docx::write_docx(&blocks)
}
