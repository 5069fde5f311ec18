//! Uploaded document decoding: raw bytes + declared MIME type → plain text.
//!
//! PDF goes through `pdf-extract`; DOCX is a zip container whose
//! `word/document.xml` holds the paragraphs. Decoding is CPU-bound, callers on
//! the async runtime should wrap it in `spawn_blocking`.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOCX_MIME_SHORT: &str = "application/docx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves a declared content type, ignoring parameters and case.
    pub fn from_mime(mime: &str) -> Result<Self, AppError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Ok(DocumentKind::Pdf),
            DOCX_MIME | DOCX_MIME_SHORT => Ok(DocumentKind::Docx),
            _ => Err(AppError::UnsupportedMediaType(mime.to_string())),
        }
    }
}

/// Decodes `bytes` according to `mime`.
pub fn extract_text(bytes: &[u8], mime: &str) -> Result<String, AppError> {
    match DocumentKind::from_mime(mime)? {
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to read PDF: {e}")))
}

fn extract_docx(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Failed to open DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::Extraction(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("Failed to read DOCX body: {e}")))?;

    Ok(docx_paragraphs(&xml))
}

fn paragraph_pattern() -> &'static Regex {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    // `<w:p>` or `<w:p attr..>`; `<w:pPr>` and friends are not paragraphs.
    PARAGRAPH.get_or_init(|| Regex::new(r"(?s)<w:p[\s>].*?</w:p>").expect("static paragraph pattern"))
}

fn run_text_pattern() -> &'static Regex {
    static RUN_TEXT: OnceLock<Regex> = OnceLock::new();
    RUN_TEXT.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("static run text pattern")
    })
}

/// One line per paragraph, each terminated by a newline.
fn docx_paragraphs(xml: &str) -> String {
    let mut text = String::new();
    for paragraph in paragraph_pattern().find_iter(xml) {
        for run in run_text_pattern().captures_iter(paragraph.as_str()) {
            if let Some(fragment) = run.get(1) {
                text.push_str(&unescape_xml(fragment.as_str()));
            }
        }
        text.push('\n');
    }
    text
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Packs `document_xml` into a minimal DOCX container.
#[cfg(test)]
pub(crate) fn build_docx(document_xml: &str) -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
