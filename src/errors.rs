//! Error taxonomy for the summarization pipeline.
//!
//! Every failure the library can surface is a [`SummarizeError`]. Each variant
//! maps to a stable [`ErrorCode`] so a serving layer can translate failures
//! into user-facing messages without matching on display strings.

use serde::Serialize;
use thiserror::Error;

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EmptyContent,
    EmptyDocument,
    UnsupportedLanguage,
    UnsupportedFormat,
    SizeExceeded,
    ExtractionFailed,
    InvalidRatio,
    InvalidModelType,
    InvalidConfig,
    UnknownField,
    Io,
}

impl ErrorCode {
    /// Returns the snake_case name used in JSON and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyContent => "empty_content",
            Self::EmptyDocument => "empty_document",
            Self::UnsupportedLanguage => "unsupported_language",
            Self::UnsupportedFormat => "unsupported_format",
            Self::SizeExceeded => "size_exceeded",
            Self::ExtractionFailed => "extraction_failed",
            Self::InvalidRatio => "invalid_ratio",
            Self::InvalidModelType => "invalid_model_type",
            Self::InvalidConfig => "invalid_config",
            Self::UnknownField => "unknown_field",
            Self::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for summarization.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Input was empty or whitespace-only.
    #[error("no usable text to summarize")]
    EmptyContent,

    /// Segmentation produced zero sentences.
    #[error("document contains no sentences")]
    EmptyDocument,

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("document of {size} bytes exceeds the {limit} byte limit")]
    SizeExceeded { size: usize, limit: usize },

    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    /// Ratio was not a finite number. Finite out-of-range ratios are clamped.
    #[error("invalid summary ratio: {0}")]
    InvalidRatio(f64),

    #[error("unknown summarization model: {0}")]
    InvalidModelType(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SummarizeError {
    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyContent => ErrorCode::EmptyContent,
            Self::EmptyDocument => ErrorCode::EmptyDocument,
            Self::UnsupportedLanguage(_) => ErrorCode::UnsupportedLanguage,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            Self::SizeExceeded { .. } => ErrorCode::SizeExceeded,
            Self::ExtractionFailed(_) => ErrorCode::ExtractionFailed,
            Self::InvalidRatio(_) => ErrorCode::InvalidRatio,
            Self::InvalidModelType(_) => ErrorCode::InvalidModelType,
            Self::InvalidConfig(_) | Self::Json(_) => ErrorCode::InvalidConfig,
            Self::Io(_) => ErrorCode::Io,
        }
    }
}

/// Result type for summarization operations.
pub type Result<T> = std::result::Result<T, SummarizeError>;
