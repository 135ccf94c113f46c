//! Document ingestion: text extraction and cleaning for uploaded cases.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Runs of whitespace collapse to a single space.
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUNS regex should compile"));

/// Anything outside word characters, whitespace, and common punctuation
/// is dropped.
static SPECIAL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^\w\s.,;:!?'"()-]"#).expect("SPECIAL_CHARS regex should compile")
});

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Only PDF and TXT files are supported")]
    UnsupportedFormat,
    #[error("Error extracting PDF text: {0}")]
    Pdf(String),
    #[error("document is not valid UTF-8")]
    InvalidEncoding,
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Detect the format from the uploaded filename.
    pub fn from_filename(filename: &str) -> Result<Self, IngestError> {
        if filename.ends_with(".pdf") {
            Ok(Self::Pdf)
        } else if filename.ends_with(".txt") {
            Ok(Self::PlainText)
        } else {
            Err(IngestError::UnsupportedFormat)
        }
    }
}

/// Extract raw text from uploaded document bytes.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, IngestError> {
    match format {
        DocumentFormat::Pdf => extract_pdf_text(bytes),
        DocumentFormat::PlainText => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => Err(IngestError::InvalidEncoding),
        },
    }
}

/// Page-by-page text extraction, one newline between pages.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, IngestError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| IngestError::Pdf(e.to_string()))?;
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

    let mut text = String::new();
    for page_number in page_numbers {
        let page_text = document
            .extract_text(&[page_number])
            .map_err(|e| IngestError::Pdf(e.to_string()))?;
        text.push_str(&page_text);
        text.push('\n');
    }
    Ok(text.trim().to_string())
}

/// Normalize extracted text: collapse whitespace, drop special characters,
/// trim. Dropped characters can leave doubled spaces since stripping runs
/// after the collapse.
pub fn clean_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(text, " ");
    let stripped = SPECIAL_CHARS.replace_all(&collapsed, "");
    stripped.trim().to_string()
}
