//! Document extraction boundary.
//!
//! Extractors turn raw document bytes into plain Unicode text before the core
//! pipeline sees them. [`PlainTextExtractor`] handles the text formats;
//! binary formats (PDF, Word) and HTML are left to external extractors
//! implementing [`DocumentExtractor`].

use std::path::Path;

use crate::errors::{Result, SummarizeError};

/// Upper bound on accepted document size (10 MB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Word,
    Html,
    Markdown,
}

impl DocumentFormat {
    /// Resolve a format from a file extension (case-insensitive, no dot).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::PlainText),
            "pdf" => Ok(Self::Pdf),
            "doc" | "docx" => Ok(Self::Word),
            "html" | "htm" => Ok(Self::Html),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(SummarizeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Resolve a format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| SummarizeError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Pdf => "pdf",
            Self::Word => "docx",
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

/// Recovers plain text from document bytes.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String>;
}

/// Extractor for UTF-8 text formats.
#[derive(Debug, Clone, Copy)]
pub struct PlainTextExtractor {
    max_bytes: usize,
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self {
            max_bytes: MAX_DOCUMENT_BYTES,
        }
    }
}

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Read a file and extract it according to its extension.
    pub fn extract_path(&self, path: &Path) -> Result<String> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        self.extract(&bytes, format)
    }
}

impl DocumentExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String> {
        if bytes.len() > self.max_bytes {
            return Err(SummarizeError::SizeExceeded {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        match format {
            DocumentFormat::PlainText | DocumentFormat::Markdown => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| SummarizeError::ExtractionFailed(e.to_string()))?;
                Ok(text.trim_start_matches('\u{feff}').to_string())
            }
            other => Err(SummarizeError::UnsupportedFormat(other.as_str().to_string())),
        }
    }
}
