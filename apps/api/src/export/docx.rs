//! Minimal WordprocessingML writer for classified Markdown blocks.
//!
//! Produces a self-contained `.docx` (no template file): styles, a bullet
//! numbering definition and core properties are generated inline.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use chrono::{SecondsFormat, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::export::markdown::{Block, Run};
use crate::export::ExportError;

const INK: &str = "1A1A2E";
const SUBTITLE_COLOR: &str = "444466";
const CONTACT_COLOR: &str = "555555";

const BODY_PT: f32 = 10.5;
const CELL_PT: f32 = 9.5;

// US Letter in twentieths of a point, margins 0.7" / 0.8".
const PAGE_WIDTH: u32 = 12240;
const PAGE_HEIGHT: u32 = 15840;
const MARGIN_TOP_BOTTOM: u32 = 1008;
const MARGIN_LEFT_RIGHT: u32 = 1152;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * MARGIN_LEFT_RIGHT;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/><w:sz w:val="21"/><w:szCs w:val="21"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:before="0" w:after="40"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:before="0" w:after="40"/></w:pPr><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="21"/><w:szCs w:val="21"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style><w:style w:type="table" w:styleId="LightGrid-Accent1"><w:name w:val="Light Grid Accent 1"/><w:basedOn w:val="TableNormal"/><w:pPr><w:spacing w:after="0"/></w:pPr><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/><w:left w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/><w:bottom w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/><w:right w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/><w:insideH w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/><w:insideV w:val="single" w:sz="8" w:space="0" w:color="4F81BD"/></w:tblBorders></w:tblPr><w:tblStylePr w:type="firstRow"><w:rPr><w:b/><w:bCs/></w:rPr><w:tblPr/><w:tcPr><w:tcBorders><w:bottom w:val="single" w:sz="18" w:space="0" w:color="4F81BD"/></w:tcBorders></w:tcPr></w:tblStylePr></w:style></w:styles>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="&#8226;"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

/// Paragraph-level formatting.
#[derive(Debug, Default, Clone, Copy)]
struct ParagraphFormat {
    style: Option<&'static str>,
    centered: bool,
    before_pt: Option<f32>,
    after_pt: Option<f32>,
    bottom_border: bool,
}

/// Character-level formatting.
#[derive(Debug, Clone, Copy)]
struct RunFormat {
    bold: bool,
    italic: bool,
    size_pt: f32,
    color: Option<&'static str>,
}

impl RunFormat {
    fn body() -> Self {
        Self {
            bold: false,
            italic: false,
            size_pt: BODY_PT,
            color: None,
        }
    }

    fn from_run(run: &Run) -> Self {
        Self {
            bold: run.bold,
            italic: run.italic,
            ..Self::body()
        }
    }
}

/// Writes the blocks as a complete `.docx` archive.
pub fn write_docx(blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
    let document = document_xml(blocks);
    let core = core_xml();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts: [(&str, &str); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", &document),
        ("word/styles.xml", STYLES),
        ("word/numbering.xml", NUMBERING),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS),
        ("docProps/core.xml", &core),
    ];
    for (name, body) in parts {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn document_xml(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        write_block(&mut body, block);
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{MARGIN_TOP_BOTTOM}" w:right="{MARGIN_LEFT_RIGHT}" w:bottom="{MARGIN_TOP_BOTTOM}" w:left="{MARGIN_LEFT_RIGHT}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn core_xml() -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>{creator}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified></cp:coreProperties>"#,
        creator = env!("CARGO_PKG_NAME"),
    )
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Title(text) => paragraph(
            out,
            ParagraphFormat {
                centered: true,
                after_pt: Some(2.0),
                ..Default::default()
            },
            &[(
                text.as_str(),
                RunFormat {
                    bold: true,
                    size_pt: 18.0,
                    color: Some(INK),
                    ..RunFormat::body()
                },
            )],
        ),
        Block::Subtitle(text) => paragraph(
            out,
            ParagraphFormat {
                centered: true,
                after_pt: Some(4.0),
                ..Default::default()
            },
            &[(
                text.as_str(),
                RunFormat {
                    size_pt: 12.0,
                    color: Some(SUBTITLE_COLOR),
                    ..RunFormat::body()
                },
            )],
        ),
        Block::SectionHeader(text) => paragraph(
            out,
            ParagraphFormat {
                before_pt: Some(10.0),
                after_pt: Some(3.0),
                bottom_border: true,
                ..Default::default()
            },
            &[(
                text.as_str(),
                RunFormat {
                    bold: true,
                    size_pt: 11.0,
                    color: Some(INK),
                    ..RunFormat::body()
                },
            )],
        ),
        Block::Bullet(runs) => inline_paragraph(
            out,
            ParagraphFormat {
                style: Some("ListBullet"),
                before_pt: Some(1.0),
                after_pt: Some(1.0),
                ..Default::default()
            },
            runs,
        ),
        Block::Contact(text) => paragraph(
            out,
            ParagraphFormat {
                centered: true,
                after_pt: Some(6.0),
                ..Default::default()
            },
            &[(
                text.as_str(),
                RunFormat {
                    size_pt: CELL_PT,
                    color: Some(CONTACT_COLOR),
                    ..RunFormat::body()
                },
            )],
        ),
        Block::Table(rows) => table(out, rows),
        Block::BoldLine(runs) => inline_paragraph(
            out,
            ParagraphFormat {
                after_pt: Some(1.0),
                ..Default::default()
            },
            runs,
        ),
        Block::ItalicLine(text) => paragraph(
            out,
            ParagraphFormat {
                after_pt: Some(1.0),
                ..Default::default()
            },
            &[(
                text.as_str(),
                RunFormat {
                    italic: true,
                    size_pt: 10.0,
                    ..RunFormat::body()
                },
            )],
        ),
        Block::Paragraph(runs) => inline_paragraph(
            out,
            ParagraphFormat {
                after_pt: Some(3.0),
                ..Default::default()
            },
            runs,
        ),
    }
}

fn inline_paragraph(out: &mut String, format: ParagraphFormat, runs: &[Run]) {
    let runs: Vec<(&str, RunFormat)> = runs
        .iter()
        .map(|r| (r.text.as_str(), RunFormat::from_run(r)))
        .collect();
    paragraph(out, format, &runs);
}

fn paragraph(out: &mut String, format: ParagraphFormat, runs: &[(&str, RunFormat)]) {
    out.push_str("<w:p><w:pPr>");
    if let Some(style) = format.style {
        let _ = write!(out, r#"<w:pStyle w:val="{style}"/>"#);
    }
    if format.bottom_border {
        let _ = write!(
            out,
            r#"<w:pBdr><w:bottom w:val="single" w:sz="4" w:space="1" w:color="{INK}"/></w:pBdr>"#
        );
    }
    if format.before_pt.is_some() || format.after_pt.is_some() {
        out.push_str("<w:spacing");
        if let Some(before) = format.before_pt {
            let _ = write!(out, r#" w:before="{}""#, twips(before));
        }
        if let Some(after) = format.after_pt {
            let _ = write!(out, r#" w:after="{}""#, twips(after));
        }
        out.push_str("/>");
    }
    if format.centered {
        out.push_str(r#"<w:jc w:val="center"/>"#);
    }
    out.push_str("</w:pPr>");

    for (text, run_format) in runs {
        run(out, text, *run_format);
    }
    out.push_str("</w:p>");
}

fn run(out: &mut String, text: &str, format: RunFormat) {
    out.push_str(r#"<w:r><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
    if format.bold {
        out.push_str("<w:b/>");
    }
    if format.italic {
        out.push_str("<w:i/>");
    }
    if let Some(color) = format.color {
        let _ = write!(out, r#"<w:color w:val="{color}"/>"#);
    }
    let size = half_points(format.size_pt);
    let _ = write!(
        out,
        r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape_xml(text)
    );
}

/// Column count is the widest row; short rows get empty trailing cells.
fn table(out: &mut String, rows: &[Vec<String>]) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return;
    }
    let col_width = TEXT_WIDTH / columns as u32;

    out.push_str(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="LightGrid-Accent1"/><w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr><w:tblGrid>"#,
    );
    for _ in 0..columns {
        let _ = write!(out, r#"<w:gridCol w:w="{col_width}"/>"#);
    }
    out.push_str("</w:tblGrid>");

    let cell_format = RunFormat {
        size_pt: CELL_PT,
        ..RunFormat::body()
    };
    for row in rows {
        out.push_str("<w:tr>");
        for col in 0..columns {
            let _ = write!(
                out,
                r#"<w:tc><w:tcPr><w:tcW w:w="{col_width}" w:type="dxa"/></w:tcPr>"#
            );
            match row.get(col).filter(|c| !c.is_empty()) {
                Some(cell) => paragraph(
                    out,
                    ParagraphFormat::default(),
                    &[(cell.as_str(), cell_format)],
                ),
                None => out.push_str("<w:p/>"),
            }
            out.push_str("</w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

fn twips(pt: f32) -> u32 {
    (pt * 20.0).round() as u32
}

fn half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // control characters other than tab/newline are invalid in XML 1.0
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}
