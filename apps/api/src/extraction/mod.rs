//! Text extraction — turns an uploaded PDF or DOCX into plain text for the scorer.
//!
//! One awaited call per upload. Parsing is CPU-bound and runs on the blocking pool;
//! timeouts and retries, if any, belong to the caller.

mod docx;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub use docx::extract_docx_text;
#[cfg(test)]
pub(crate) use docx::fixture as docx_fixture;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from the file. It might be scanned or image-based.")]
    Empty,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// File extension wins over the declared content type, which browsers often
    /// leave generic.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Some(DocumentFormat::Pdf),
            Some("docx") => return Some(DocumentFormat::Docx),
            _ => {}
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some(PDF_MIME) => Some(DocumentFormat::Pdf),
            Some(DOCX_MIME) => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    fn extract(self, bytes: &[u8]) -> Result<String, ExtractionError> {
        match self {
            DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| ExtractionError::Pdf(e.to_string())),
            DocumentFormat::Docx => extract_docx_text(bytes),
        }
    }
}

/// Extracts trimmed text from an uploaded document.
///
/// Errors with `UnsupportedFormat` before touching the bytes when the format is
/// neither PDF nor DOCX, and with `Empty` when the document holds no text.
pub async fn extract_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: Bytes,
) -> Result<String, ExtractionError> {
    let format = DocumentFormat::detect(file_name, content_type).ok_or_else(|| {
        ExtractionError::UnsupportedFormat(
            "only PDF and DOCX files are supported".to_string(),
        )
    })?;

    debug!("Extracting {:?} document ({} bytes)", format, bytes.len());

    let text = tokio::task::spawn_blocking(move || format.extract(&bytes)).await??;

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text.to_string())
}
