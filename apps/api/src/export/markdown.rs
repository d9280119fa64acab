//! Line classifier for the Markdown the LLM returns.
//!
//! Works line by line rather than as a full CommonMark parser: the generated
//! documents follow a fixed shape (name, subtitle, contact line, section
//! headers, bullets, an optional pipe table) and each line maps to one block.

use std::sync::OnceLock;

use regex::Regex;

/// A span of inline text with emphasis flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

#[cfg(test)]
impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }
}

/// One formatted unit of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `# Name`
    Title(String),
    /// `### Subtitle`, emphasis markers removed.
    Subtitle(String),
    /// `## Section`, uppercased.
    SectionHeader(String),
    /// `* item` or `- item`
    Bullet(Vec<Run>),
    /// `City | Phone | Email` style line, emphasis markers removed.
    Contact(String),
    /// Pipe table rows with separator rows dropped.
    Table(Vec<Vec<String>>),
    /// Line opening with `**…**`.
    BoldLine(Vec<Run>),
    /// `*whole line*`
    ItalicLine(String),
    Paragraph(Vec<Run>),
}

fn inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*.*?\*\*|\*.*?\*").expect("valid inline regex"))
}

/// Classifies every non-blank line. First matching rule wins.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let lines: Vec<&str> = markdown.split('\n').map(str::trim).collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.is_empty() {
            i += 1;
            continue;
        }

        if line.starts_with("# ") && !line.starts_with("## ") {
            blocks.push(Block::Title(strip_heading(line).to_string()));
        } else if line.starts_with("### ") {
            blocks.push(Block::Subtitle(strip_emphasis(strip_heading(line))));
        } else if line.starts_with("## ") {
            blocks.push(Block::SectionHeader(strip_heading(line).to_uppercase()));
        } else if line.starts_with("* ") || line.starts_with("- ") {
            blocks.push(Block::Bullet(parse_runs(line[2..].trim())));
        } else if is_contact_line(line) {
            blocks.push(Block::Contact(strip_emphasis(line).trim().to_string()));
        } else if line.starts_with('|') && line.ends_with('|') {
            let mut rows = Vec::new();
            while i < lines.len() && lines[i].starts_with('|') {
                let row = lines[i];
                if !is_separator_row(row) {
                    rows.push(table_cells(row));
                }
                i += 1;
            }
            if !rows.is_empty() {
                blocks.push(Block::Table(rows));
            }
            continue;
        } else if line.starts_with("**") && line[2..].contains("**") {
            blocks.push(Block::BoldLine(parse_runs(line)));
        } else if line.starts_with('*') && line.ends_with('*') && !line.starts_with("**") {
            blocks.push(Block::ItalicLine(line.trim_matches('*').trim().to_string()));
        } else {
            blocks.push(Block::Paragraph(parse_runs(line)));
        }

        i += 1;
    }

    blocks
}

/// Splits text into plain, `**bold**` and `*italic*` runs. Empty runs are dropped.
pub fn parse_runs(text: &str) -> Vec<Run> {
    let mut parts: Vec<&str> = Vec::new();
    let mut last = 0;
    for m in inline_re().find_iter(text) {
        parts.push(&text[last..m.start()]);
        parts.push(m.as_str());
        last = m.end();
    }
    parts.push(&text[last..]);

    parts
        .into_iter()
        .filter_map(|part| {
            let len = part.len();
            let (inner, bold, italic) =
                if len >= 4 && part.starts_with("**") && part.ends_with("**") {
                    (&part[2..len - 2], true, false)
                } else if len >= 2 && part.starts_with('*') && part.ends_with('*') {
                    (&part[1..len - 1], false, true)
                } else {
                    (part, false, false)
                };
            (!inner.is_empty()).then(|| Run {
                text: inner.to_string(),
                bold,
                italic,
            })
        })
        .collect()
}

/// Drops the leading `#`/space prefix of a heading.
fn strip_heading(line: &str) -> &str {
    line.trim_start_matches(['#', ' ']).trim()
}

fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}

fn is_contact_line(line: &str) -> bool {
    if !line.contains('|') {
        return false;
    }
    let lower = line.to_lowercase();
    line.contains('@') || lower.contains("phone") || lower.contains("linkedin")
}

/// `|---|:---:|` style rows.
fn is_separator_row(row: &str) -> bool {
    row.chars().all(|c| matches!(c, '-' | '|' | ' ' | ':'))
}

/// Cells between the outer pipes, trimmed and without emphasis markers.
fn table_cells(row: &str) -> Vec<String> {
    let pieces: Vec<&str> = row.split('|').collect();
    if pieces.len() < 2 {
        return Vec::new();
    }
    pieces[1..pieces.len() - 1]
        .iter()
        .map(|c| strip_emphasis(c.trim()))
        .collect()
}
