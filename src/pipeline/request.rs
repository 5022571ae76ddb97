//! Serving-layer request and response records.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "text": "Plain text to summarize ...",
//!   "model_type": "ensemble",
//!   "ratio": 0.3,
//!   "language": "english"
//! }
//! ```
//!
//! Every field except `text` has a default. Unrecognized fields are captured
//! so [`super::validation::RequestValidator`] can warn about them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::SummaryResult;

fn default_model_type() -> String {
    "ensemble".to_string()
}

fn default_ratio() -> f64 {
    0.3
}

fn default_language() -> String {
    "english".to_string()
}

/// A summarization request as received by a serving layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizationRequest {
    /// Input text (or text already recovered by an extractor).
    #[serde(default)]
    pub text: String,

    #[serde(default = "default_model_type")]
    pub model_type: String,

    #[serde(default = "default_ratio")]
    pub ratio: f64,

    #[serde(default = "default_language")]
    pub language: String,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl SummarizationRequest {
    /// A request for `text` with every other field at its default.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_type: default_model_type(),
            ratio: default_ratio(),
            language: default_language(),
            unknown_fields: HashMap::new(),
        }
    }

    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = model_type.into();
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// The response record returned for a successful request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizationResponse {
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub compression_ratio: f64,
    pub model_used: String,
    pub sentence_count: usize,
    /// Core pipeline time in seconds.
    pub processing_time: f64,
}

impl From<&SummaryResult> for SummarizationResponse {
    fn from(result: &SummaryResult) -> Self {
        Self {
            summary: result.summary.clone(),
            original_length: result.original_length,
            summary_length: result.summary_length,
            compression_ratio: result.compression_ratio,
            model_used: result.model.as_str().to_string(),
            sentence_count: result.sentence_count(),
            processing_time: result.processing_time.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::types::ModelType;

    #[test]
    fn test_deserialize_minimal_request() {
        let req: SummarizationRequest = serde_json::from_str(r#"{ "text": "Hello." }"#).unwrap();
        assert_eq!(req, SummarizationRequest::new("Hello."));
        assert_eq!(req.model_type, "ensemble");
        assert_eq!(req.ratio, 0.3);
        assert_eq!(req.language, "english");
    }

    #[test]
    fn test_unknown_fields_captured() {
        let req: SummarizationRequest = serde_json::from_str(
            r#"{ "text": "Hello.", "model_type": "tfidf", "max_words": 40 }"#,
        )
        .unwrap();
        assert_eq!(req.model_type, "tfidf");
        assert!(req.unknown_fields.contains_key("max_words"));
        assert!(!req.unknown_fields.contains_key("text"));
    }

    #[test]
    fn test_response_from_result() {
        let result = SummaryResult {
            sentences: vec!["One.".into(), "Three.".into()],
            selected: vec![0, 2],
            summary: "One. Three.".into(),
            original_length: 8,
            summary_length: 2,
            compression_ratio: 0.25,
            model: ModelType::TextRank,
            ratio: 0.5,
            total_sentences: 4,
            processing_time: Duration::from_millis(1500),
        };
        let response = SummarizationResponse::from(&result);

        assert_eq!(response.model_used, "textrank");
        assert_eq!(response.sentence_count, 2);
        assert_eq!(response.processing_time, 1.5);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["compression_ratio"], 0.25);
        assert_eq!(json["summary"], "One. Three.");
    }
}
