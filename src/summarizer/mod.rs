//! Summarization entry points
//!
//! [`Summarizer`] owns a shared [`LanguageRegistry`] and a validated
//! [`SummarizerConfig`]; every call resolves its request against them and
//! runs one [`Pipeline`]. It holds no per-request state, so a single
//! instance serves concurrent callers.

pub mod selector;

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::json;

use crate::errors::Result;
use crate::evaluation::{RougeEvaluator, RougeScores};
use crate::nlp::LanguageRegistry;
use crate::pipeline::observer::{NoopObserver, PipelineObserver};
use crate::pipeline::request::{SummarizationRequest, SummarizationResponse};
use crate::pipeline::runner::Pipeline;
use crate::pipeline::validation::{RequestValidator, ValidationContext, ValidationReport};
use crate::types::{ModelType, SummarizerConfig, SummaryResult};

/// Outcome of one model in a [`BenchmarkReport`]
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkEntry {
    pub model: ModelType,
    pub summary: String,
    pub sentence_count: usize,
    pub summary_length: usize,
    pub compression_ratio: f64,
    /// Seconds
    pub processing_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rouge: Option<RougeScores>,
}

/// Every model run over the same input
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub original_length: usize,
    pub total_sentences: usize,
    pub ratio: f64,
    pub entries: Vec<BenchmarkEntry>,
}

impl BenchmarkReport {
    pub fn entry(&self, model: ModelType) -> Option<&BenchmarkEntry> {
        self.entries.iter().find(|e| e.model == model)
    }

    /// Entry with the lowest processing time
    pub fn fastest(&self) -> Option<&BenchmarkEntry> {
        self.entries
            .iter()
            .min_by(|a, b| a.processing_time.total_cmp(&b.processing_time))
    }

    /// Entry with the highest average ROUGE, when a reference was given
    pub fn best_rouge(&self) -> Option<&BenchmarkEntry> {
        self.entries
            .iter()
            .filter(|e| e.rouge.is_some())
            .max_by(|a, b| {
                let score = |e: &BenchmarkEntry| e.rouge.map_or(0.0, |r| r.average_rouge);
                score(a).total_cmp(&score(b))
            })
    }
}

/// Extractive summarizer facade
#[derive(Debug, Clone)]
pub struct Summarizer {
    registry: Arc<LanguageRegistry>,
    config: SummarizerConfig,
    pipeline: Pipeline,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::with_registry(Arc::new(LanguageRegistry::new()))
    }
}

impl Summarizer {
    /// Create a summarizer; fails with `InvalidConfig` for unusable parameters.
    pub fn new(registry: Arc<LanguageRegistry>, config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: Pipeline::new(&config),
            registry,
            config,
        })
    }

    /// Default configuration over a shared registry
    pub fn with_registry(registry: Arc<LanguageRegistry>) -> Self {
        let config = SummarizerConfig::default();
        Self {
            pipeline: Pipeline::new(&config),
            registry,
            config,
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Summarize `text`.
    ///
    /// `ratio` defaults to the configured default and is clamped to the
    /// configured bounds; `language` is a tag such as `"english"` or `"de"`.
    pub fn summarize(
        &self,
        text: &str,
        model: ModelType,
        ratio: Option<f64>,
        language: &str,
    ) -> Result<SummaryResult> {
        self.summarize_observed(text, model, ratio, language, &mut NoopObserver)
    }

    /// [`summarize`](Self::summarize) reporting stage boundaries to `observer`
    pub fn summarize_observed(
        &self,
        text: &str,
        model: ModelType,
        ratio: Option<f64>,
        language: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<SummaryResult> {
        let resources = self.registry.resolve(language)?;
        let ratio = self.config.resolve_ratio(ratio)?;
        self.pipeline.run(text, resources, model, ratio, observer)
    }

    /// Summarize several documents in parallel; results keep input order.
    pub fn summarize_many<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
        model: ModelType,
        ratio: Option<f64>,
        language: &str,
    ) -> Vec<Result<SummaryResult>> {
        texts
            .par_iter()
            .map(|text| self.summarize(text.as_ref(), model, ratio, language))
            .collect()
    }

    /// Check a request, collecting every problem instead of stopping at the first
    pub fn validate(&self, request: &SummarizationRequest) -> ValidationReport {
        let ctx = ValidationContext::new(&self.registry, &self.config);
        RequestValidator::with_defaults().validate(request, &ctx)
    }

    /// Serve one request record.
    ///
    /// Validation warnings (clamped ratio, unknown fields) are logged and the
    /// request proceeds; errors surface as the corresponding [`SummarizeError`].
    ///
    /// [`SummarizeError`]: crate::errors::SummarizeError
    pub fn handle(&self, request: &SummarizationRequest) -> Result<SummarizationResponse> {
        let report = self.validate(request);
        for warning in report.warnings() {
            #[cfg(feature = "tracing")]
            tracing::warn!(code = %warning.code, path = %warning.path, "{}", warning.message);
            #[cfg(not(feature = "tracing"))]
            let _ = warning;
        }

        let model: ModelType = request.model_type.parse()?;
        let result = self.summarize(&request.text, model, Some(request.ratio), &request.language)?;
        Ok(SummarizationResponse::from(&result))
    }

    /// Models this summarizer can run
    pub fn available_models() -> &'static [ModelType] {
        &ModelType::ALL
    }

    /// Parameters a model runs with, as JSON
    pub fn model_info(&self, model: ModelType, language: &str) -> Result<serde_json::Value> {
        let resources = self.registry.resolve(language)?;
        let components: Vec<&str> = match model {
            ModelType::TextRank => vec!["textrank"],
            ModelType::TfIdf => vec!["tfidf"],
            ModelType::Ensemble => vec!["textrank", "tfidf"],
        };
        let fusion = match model {
            ModelType::Ensemble => "mean_min_max",
            _ => "none",
        };

        Ok(json!({
            "model_type": model.as_str(),
            "language": resources.language().as_str(),
            "components": components,
            "fusion": fusion,
            "parameters": {
                "textrank": self.config.textrank,
                "tfidf": self.config.tfidf,
            },
            "ratio": {
                "min": self.config.min_ratio,
                "max": self.config.max_ratio,
                "default": self.config.default_ratio,
            },
        }))
    }

    /// Run every model over the same input.
    ///
    /// With a `reference` summary each entry also carries ROUGE scores.
    pub fn benchmark(
        &self,
        text: &str,
        ratio: Option<f64>,
        language: &str,
        reference: Option<&str>,
    ) -> Result<BenchmarkReport> {
        let evaluator = RougeEvaluator::new();
        let mut entries = Vec::with_capacity(ModelType::ALL.len());
        let mut original_length = 0;
        let mut total_sentences = 0;
        let mut applied_ratio = 0.0;

        for &model in Self::available_models() {
            let result = self.summarize(text, model, ratio, language)?;
            original_length = result.original_length;
            total_sentences = result.total_sentences;
            applied_ratio = result.ratio;

            entries.push(BenchmarkEntry {
                model,
                sentence_count: result.sentence_count(),
                summary_length: result.summary_length,
                compression_ratio: result.compression_ratio,
                processing_time: result.processing_time.as_secs_f64(),
                rouge: reference.map(|r| evaluator.evaluate(r, &result.summary)),
                summary: result.summary,
            });
        }

        Ok(BenchmarkReport {
            original_length,
            total_sentences,
            ratio: applied_ratio,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SummarizeError;
    use crate::types::Language;

    const TEXT: &str = "Solar panels convert sunlight into electricity. \
        Modern solar panels reach high efficiency. \
        Wind turbines also produce electricity. \
        Many countries invest in solar and wind energy. \
        Energy storage remains a challenge for renewable power.";

    fn summarizer() -> Summarizer {
        Summarizer::with_registry(Arc::new(LanguageRegistry::with_languages(&[
            Language::English,
        ])))
    }

    #[test]
    fn test_summarize_defaults() {
        let result = summarizer()
            .summarize(TEXT, ModelType::Ensemble, None, "english")
            .unwrap();
        assert_eq!(result.total_sentences, 5);
        assert_eq!(result.ratio, 0.3);
        // round(0.3 * 5) = 2
        assert_eq!(result.sentence_count(), 2);
    }

    #[test]
    fn test_ratio_is_clamped() {
        let s = summarizer();
        let high = s
            .summarize(TEXT, ModelType::TfIdf, Some(0.95), "en")
            .unwrap();
        assert_eq!(high.ratio, 0.5);
        assert_eq!(high.sentence_count(), 3);

        let err = s
            .summarize(TEXT, ModelType::TfIdf, Some(f64::INFINITY), "en")
            .unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidRatio(_)));
    }

    #[test]
    fn test_unknown_language() {
        let err = summarizer()
            .summarize(TEXT, ModelType::Ensemble, None, "klingon")
            .unwrap_err();
        assert!(matches!(err, SummarizeError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SummarizerConfig {
            min_ratio: 0.0,
            ..SummarizerConfig::default()
        };
        let err = Summarizer::new(Arc::new(LanguageRegistry::new()), config).unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidConfig(_)));
    }

    #[test]
    fn test_handle_request() {
        let request = SummarizationRequest::new(TEXT)
            .with_model_type("textrank")
            .with_ratio(0.4);
        let response = summarizer().handle(&request).unwrap();

        assert_eq!(response.model_used, "textrank");
        assert_eq!(response.sentence_count, 2);
        assert!(response.compression_ratio > 0.0 && response.compression_ratio < 1.0);
    }

    #[test]
    fn test_handle_rejects_unknown_model() {
        let request = SummarizationRequest::new(TEXT).with_model_type("bert");
        let err = summarizer().handle(&request).unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidModelType(_)));
    }

    #[test]
    fn test_model_listing_and_info() {
        let names: Vec<&str> = Summarizer::available_models()
            .iter()
            .map(|m| m.as_str())
            .collect();
        assert_eq!(names, vec!["textrank", "tfidf", "ensemble"]);

        let info = summarizer()
            .model_info(ModelType::Ensemble, "english")
            .unwrap();
        assert_eq!(info["model_type"], "ensemble");
        assert_eq!(info["language"], "english");
        assert_eq!(info["parameters"]["textrank"]["damping"], 0.85);
        assert_eq!(info["parameters"]["tfidf"]["aggregation"], "sum");
    }

    #[test]
    fn test_benchmark_runs_all_models() {
        let reference = "Solar panels convert sunlight into electricity.";
        let report = summarizer()
            .benchmark(TEXT, Some(0.2), "english", Some(reference))
            .unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.total_sentences, 5);
        for model in ModelType::ALL {
            let entry = report.entry(model).unwrap();
            assert_eq!(entry.sentence_count, 1);
            assert!(entry.rouge.is_some());
        }
        assert!(report.fastest().is_some());
        assert!(report.best_rouge().is_some());
    }

    #[test]
    fn test_summarize_many_keeps_order() {
        let texts = vec![TEXT, "", "Just one sentence."];
        let results = summarizer().summarize_many(&texts, ModelType::TfIdf, None, "english");

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SummarizeError::EmptyContent)));
        assert_eq!(results[2].as_ref().unwrap().summary, "Just one sentence.");
    }
}
