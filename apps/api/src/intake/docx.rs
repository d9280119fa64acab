//! Plain-text extraction from WordprocessingML (`.docx`) files.
//!
//! Reads `word/document.xml` and emits one line per paragraph. Tabs and
//! line breaks inside a paragraph are kept; paragraph properties (which
//! carry tab-stop definitions) are skipped.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use zip::ZipArchive;

use crate::intake::IntakeError;

const DOCUMENT_PART: &str = "word/document.xml";

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:p(?:\s(?:[^>]*[^/>])?)?>(.*?)</w:p>|<w:p(?:\s[^>]*)?/>")
            .expect("valid paragraph regex")
    })
}

fn paragraph_props_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:pPr(?:\s[^>]*)?>.*?</w:pPr>").expect("valid pPr regex")
    })
}

fn run_content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?s)<w:t(?:\s(?:[^>]*[^/>])?)?>(.*?)</w:t>|<w:(tab|br|cr)(?:\s[^>]*)?/>",
        )
        .expect("valid run regex")
    })
}

/// Returns the document's paragraphs joined with `\n` (untrimmed).
pub fn extract_text(bytes: &[u8]) -> Result<String, IntakeError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| IntakeError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| IntakeError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| IntakeError::Docx(e.to_string()))?;

    Ok(paragraphs(&xml).join("\n"))
}

/// Text of every `w:p` element, in document order.
pub fn paragraphs(xml: &str) -> Vec<String> {
    paragraph_re()
        .captures_iter(xml)
        .map(|caps| match caps.get(1) {
            Some(inner) => paragraph_text(inner.as_str()),
            None => String::new(),
        })
        .collect()
}

fn paragraph_text(inner: &str) -> String {
    let inner = paragraph_props_re().replace_all(inner, "");
    let mut text = String::new();

    for caps in run_content_re().captures_iter(&inner) {
        if let Some(t) = caps.get(1) {
            text.push_str(&unescape_xml(t.as_str()));
        } else {
            match caps.get(2).map(|m| m.as_str()) {
                Some("tab") => text.push('\t'),
                Some(_) => text.push('\n'),
                None => {}
            }
        }
    }
    text
}

/// Decodes the five predefined entities and numeric character references.
pub fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after.find(';').and_then(|semi| {
            let entity = &after[..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Builds a bare `.docx` whose body holds one paragraph per input line.
    pub(crate) fn docx_with_paragraphs(lines: &[&str]) -> Vec<u8> {
        let body: String = lines
            .iter()
            .map(|l| {
                format!(
                    r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t xml:space="preserve">{l}</w:t></w:r></w:p>"#
                )
            })
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        );

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_join_runs() {
        let xml = r#"<w:body><w:p w:rsidR="00AB"><w:r><w:rPr><w:b/></w:rPr><w:t>Supply</w:t></w:r><w:r><w:t xml:space="preserve"> Sergeant</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>92Y</w:t></w:r></w:p></w:body>"#;
        assert_eq!(paragraphs(xml), vec!["Supply Sergeant", "", "92Y"]);
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs() {
        let xml = r#"<w:p><w:r><w:t>Rank</w:t><w:tab/><w:t>E-6</w:t><w:br/><w:t>SSG</w:t></w:r></w:p>"#;
        assert_eq!(paragraphs(xml), vec!["Rank\tE-6\nSSG"]);
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="right" w:pos="9360"/></w:tabs></w:pPr><w:r><w:t>2019</w:t></w:r></w:p>"#;
        assert_eq!(paragraphs(xml), vec!["2019"]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let xml = r#"<w:p><w:r><w:t>R&amp;D &lt;$5M&gt; &quot;top&quot; &#8212; &#x2713;</w:t></w:r></w:p>"#;
        assert_eq!(paragraphs(xml), vec!["R&D <$5M> \"top\" \u{2014} \u{2713}"]);
    }

    #[test]
    fn test_unknown_entity_left_alone() {
        assert_eq!(unescape_xml("AT&T &bogus; ok"), "AT&T &bogus; ok");
    }

    #[test]
    fn test_extract_text_from_archive() {
        let bytes = docx_with_paragraphs(&["First line", "Second line"]);
        assert_eq!(extract_text(&bytes).unwrap(), "First line\nSecond line");
    }

    #[test]
    fn test_archive_without_document_part() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(matches!(extract_text(&bytes), Err(IntakeError::Docx(_))));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            extract_text(b"plain text"),
            Err(IntakeError::Docx(_))
        ));
    }
}
