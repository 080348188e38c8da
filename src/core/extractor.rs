//! Best-effort mining of drawing title blocks
//!
//! Only the first page of a drawing is read. Its text is scanned line by
//! line for a description and a last-updated date. PDF parsing is an
//! optional capability: when the `pdf-text` feature is disabled (or the user
//! opts out) a [`NoTextExtractor`] is selected and every drawing falls back to
//! filename-derived defaults.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while reading a drawing's text
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("PDF has no pages")]
    NoPages,

    #[error("failed to extract text: {0}")]
    Text(String),
}

/// Fields mined from a drawing's first page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFields {
    pub description: Option<String>,
    pub date_updated: Option<String>,
}

/// Source of first-page text for a drawing
pub trait TextExtractor {
    /// Whether this extractor can read anything at all
    fn is_available(&self) -> bool {
        true
    }

    /// Extract the text of the first page, or `Ok(None)` if not supported
    fn first_page_text(&self, path: &Path) -> Result<Option<String>, ExtractError>;
}

/// Degraded mode: no PDF text capability
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextExtractor;

impl TextExtractor for NoTextExtractor {
    fn is_available(&self) -> bool {
        false
    }

    fn first_page_text(&self, _path: &Path) -> Result<Option<String>, ExtractError> {
        Ok(None)
    }
}

/// lopdf-backed extractor
///
/// Text is rebuilt from the first page's content stream so that lines
/// positioned inside a single text object stay on separate lines.
#[cfg(feature = "pdf-text")]
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

#[cfg(feature = "pdf-text")]
impl TextExtractor for PdfTextExtractor {
    fn first_page_text(&self, path: &Path) -> Result<Option<String>, ExtractError> {
        let doc = lopdf::Document::load(path).map_err(|e| ExtractError::Load(e.to_string()))?;

        let page_id = doc
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or(ExtractError::NoPages)?;

        let data = doc
            .get_page_content(page_id)
            .map_err(|e| ExtractError::Text(e.to_string()))?;
        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| ExtractError::Text(e.to_string()))?;

        Ok(Some(page_text(&content)))
    }
}

/// Flatten a content stream into text, one line per positioned text line
#[cfg(feature = "pdf-text")]
fn page_text(content: &lopdf::content::Content) -> String {
    use lopdf::Object;

    let mut text = String::new();
    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" => push_operand_text(&mut text, op.operands.first()),
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        match item {
                            Object::String(..) => push_operand_text(&mut text, Some(item)),
                            // Large negative kerning is a word gap
                            _ if number(item).is_some_and(|n| n <= -200.0) => text.push(' '),
                            _ => {}
                        }
                    }
                }
            }
            "'" => {
                line_break(&mut text);
                push_operand_text(&mut text, op.operands.last());
            }
            "\"" => {
                line_break(&mut text);
                push_operand_text(&mut text, op.operands.get(2));
            }
            "Td" | "TD" => {
                if op.operands.get(1).and_then(number).is_some_and(|ty| ty != 0.0) {
                    line_break(&mut text);
                }
            }
            "T*" | "Tm" | "ET" => line_break(&mut text),
            _ => {}
        }
    }
    text
}

#[cfg(feature = "pdf-text")]
fn line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

#[cfg(feature = "pdf-text")]
fn number(obj: &lopdf::Object) -> Option<f64> {
    match obj {
        lopdf::Object::Integer(i) => Some(*i as f64),
        lopdf::Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Decode a PDF string operand
///
/// UTF-16BE strings carry a byte order mark; anything else is treated as a
/// single-byte encoding, which covers the standard fonts title blocks use.
#[cfg(feature = "pdf-text")]
fn push_operand_text(text: &mut String, operand: Option<&lopdf::Object>) {
    let Some(lopdf::Object::String(bytes, _)) = operand else {
        return;
    };
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            text.push_str(&String::from_utf16_lossy(&units));
        }
        None => text.extend(bytes.iter().map(|&b| char::from(b))),
    }
}

/// Select the extractor for this run
///
/// Falls back to [`NoTextExtractor`] when text mining is disabled or the
/// binary was built without the `pdf-text` feature.
pub fn select_extractor(pdf_text: bool) -> Box<dyn TextExtractor> {
    #[cfg(feature = "pdf-text")]
    if pdf_text {
        return Box::new(PdfTextExtractor);
    }

    let _ = pdf_text;
    Box::new(NoTextExtractor)
}

/// Read a drawing and mine its first page
///
/// Any failure degrades to empty fields; the error is handed back so the
/// caller can report it without aborting the scan.
pub fn extract_fields(
    extractor: &dyn TextExtractor,
    path: &Path,
) -> (ContentFields, Option<ExtractError>) {
    match extractor.first_page_text(path) {
        Ok(Some(text)) => (scan_first_page(&text), None),
        Ok(None) => (ContentFields::default(), None),
        Err(e) => (ContentFields::default(), Some(e)),
    }
}

fn date_pattern() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| {
        Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{4})").expect("date pattern is valid")
    })
}

/// Scan page text for a description and a date
pub fn scan_first_page(text: &str) -> ContentFields {
    ContentFields {
        description: find_description(text),
        date_updated: find_date(text),
    }
}

/// The first labelled or recognizable title line wins
fn find_description(text: &str) -> Option<String> {
    for line in text.lines() {
        if line.contains("Title") || line.contains("Description") {
            if let Some((_, value)) = line.split_once(':') {
                return non_empty(value.trim());
            }
        }
        if line.starts_with("HARNESS") || line.starts_with("PDM") {
            return non_empty(line.trim());
        }
    }
    None
}

/// Month-first `M/D/YYYY` or `M-D-YYYY` on a "Date"/"Updated" line
fn find_date(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| line.contains("Date") || line.contains("Updated"))
        .find_map(|line| date_pattern().find(line))
        .map(|m| m.as_str().replace('-', "/"))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
