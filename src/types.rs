//! Core types shared across the summarization pipeline.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SummarizeError};

// ─── Language ───────────────────────────────────────────────────────────────

/// A language with registered stopword and stemming resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
}

impl Language {
    /// Every supported language, in a fixed order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
    ];

    /// Returns the user-facing name used in requests and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Italian => "italian",
        }
    }
}

impl FromStr for Language {
    type Err = SummarizeError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "es" | "spanish" => Ok(Self::Spanish),
            "fr" | "french" => Ok(Self::French),
            "de" | "german" => Ok(Self::German),
            "it" | "italian" => Ok(Self::Italian),
            _ => Err(SummarizeError::UnsupportedLanguage(tag.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ModelType ──────────────────────────────────────────────────────────────

/// Scoring strategy used to rank sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Mean of the min-max normalized TextRank and TF-IDF scores.
    Ensemble,
    TextRank,
    TfIdf,
}

impl ModelType {
    pub const ALL: [ModelType; 3] = [ModelType::TextRank, ModelType::TfIdf, ModelType::Ensemble];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ensemble => "ensemble",
            Self::TextRank => "textrank",
            Self::TfIdf => "tfidf",
        }
    }
}

impl FromStr for ModelType {
    type Err = SummarizeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "ensemble" => Ok(Self::Ensemble),
            "textrank" | "text_rank" => Ok(Self::TextRank),
            "tfidf" | "tf-idf" | "tf_idf" => Ok(Self::TfIdf),
            _ => Err(SummarizeError::InvalidModelType(value.to_string())),
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Document / Sentence ────────────────────────────────────────────────────

/// Raw input text with its resolved language.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub language: Language,
}

impl Document {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}

/// A sentence of the source document.
///
/// `index` is the 0-based position in source order and the only key used to
/// order the final summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    /// Source paragraph ordinal (blank-line separated).
    pub paragraph: usize,
    /// Original substring, trimmed.
    pub raw: String,
    /// Normalized terms (lower-cased, stopword-free, stemmed).
    pub tokens: Vec<String>,
}

impl Sentence {
    pub fn new(
        index: usize,
        paragraph: usize,
        raw: impl Into<String>,
        tokens: Vec<String>,
    ) -> Self {
        Self {
            index,
            paragraph,
            raw: raw.into(),
            tokens,
        }
    }
}

// ─── ScoreVector / RankedList ───────────────────────────────────────────────

/// One score per sentence, indexed by sentence index.
///
/// Backed by a dense vector, so it can neither skip nor repeat an index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreVector {
    scores: Vec<f64>,
}

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// A vector of `n` equal scores.
    pub fn uniform(n: usize, value: f64) -> Self {
        Self {
            scores: vec![value; n],
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of sentence `index` (0.0 when out of range).
    pub fn get(&self, index: usize) -> f64 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// Min-max scale into `[0, 1]`. A constant vector maps to all 1.0.
    pub fn min_max_normalized(&self) -> ScoreVector {
        let min = self.scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        if range.is_nan() || range <= 0.0 {
            return ScoreVector::uniform(self.scores.len(), 1.0);
        }

        ScoreVector::new(self.scores.iter().map(|s| (s - min) / range).collect())
    }

    /// Rank indices by score descending, ties to the lower index.
    pub fn ranked(&self) -> RankedList {
        RankedList::from_scores(self)
    }
}

/// Sentence indices ordered by score descending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankedList {
    order: Vec<usize>,
}

impl RankedList {
    pub fn from_scores(scores: &ScoreVector) -> Self {
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| {
            scores
                .get(b)
                .total_cmp(&scores.get(a))
                .then_with(|| a.cmp(&b))
        });
        Self { order }
    }

    /// The first `k` indices (fewer if the list is shorter).
    pub fn top(&self, k: usize) -> &[usize] {
        &self.order[..k.min(self.order.len())]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ─── SummaryResult ──────────────────────────────────────────────────────────

/// Output of one summarization run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    /// Selected sentence texts in source order.
    pub sentences: Vec<String>,
    /// Indices of the selected sentences, ascending.
    pub selected: Vec<usize>,
    /// Assembled summary text.
    pub summary: String,
    /// Whitespace word count of the input.
    pub original_length: usize,
    /// Whitespace word count of the summary.
    pub summary_length: usize,
    pub compression_ratio: f64,
    pub model: ModelType,
    /// Ratio actually applied, after clamping.
    pub ratio: f64,
    /// Sentence count of the source document.
    pub total_sentences: usize,
    /// Wall-clock time of the core pipeline.
    pub processing_time: Duration,
}

impl SummaryResult {
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }
}

// ─── Configuration ──────────────────────────────────────────────────────────

/// TextRank scorer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    pub damping: f64,
    /// Maximum absolute per-sentence score change that counts as converged.
    pub convergence_threshold: f64,
    pub max_iterations: usize,
    /// Sentence count from which pairwise similarities are computed in parallel.
    pub parallel_threshold: usize,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            convergence_threshold: 1e-4,
            max_iterations: 100,
            parallel_threshold: 256,
        }
    }
}

/// How per-term TF-IDF weights are folded into one sentence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfIdfAggregation {
    /// Sum of the term weights.
    #[default]
    Sum,
    /// Euclidean magnitude of the term-weight vector.
    L2Norm,
    /// Cosine similarity to the mean vector of all sentences.
    Centroid,
}

/// TF-IDF scorer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    pub use_idf: bool,
    /// `ln((1+n)/(1+df)) + 1` instead of `ln(n/df)`.
    pub smooth_idf: bool,
    /// `1 + ln(count)` instead of `count / total`.
    pub sublinear_tf: bool,
    /// Terms present in fewer sentences than this get zero weight.
    pub min_df: usize,
    pub aggregation: TfIdfAggregation,
    /// Divide the aggregate by the sentence token count (ignored for `Centroid`).
    pub length_normalize: bool,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            use_idf: true,
            smooth_idf: true,
            sublinear_tf: false,
            min_df: 1,
            aggregation: TfIdfAggregation::Sum,
            length_normalize: true,
        }
    }
}

/// Top-level summarizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub textrank: TextRankConfig,
    pub tfidf: TfIdfConfig,
    pub min_ratio: f64,
    pub max_ratio: f64,
    /// Ratio used when a request does not give one.
    pub default_ratio: f64,
    /// Separate sentences from different source paragraphs with a blank line.
    pub preserve_paragraphs: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            textrank: TextRankConfig::default(),
            tfidf: TfIdfConfig::default(),
            min_ratio: 0.10,
            max_ratio: 0.50,
            default_ratio: 0.30,
            preserve_paragraphs: false,
        }
    }
}

impl SummarizerConfig {
    /// Parse a JSON document; omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject parameter values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let tr = &self.textrank;
        if !(tr.damping > 0.0 && tr.damping < 1.0) {
            return Err(SummarizeError::InvalidConfig(format!(
                "textrank.damping must be in (0, 1), got {}",
                tr.damping
            )));
        }
        if !(tr.convergence_threshold > 0.0) {
            return Err(SummarizeError::InvalidConfig(
                "textrank.convergence_threshold must be positive".into(),
            ));
        }
        if tr.max_iterations == 0 {
            return Err(SummarizeError::InvalidConfig(
                "textrank.max_iterations must be greater than 0".into(),
            ));
        }
        if !(self.min_ratio > 0.0 && self.min_ratio <= self.max_ratio && self.max_ratio <= 1.0) {
            return Err(SummarizeError::InvalidConfig(format!(
                "ratio bounds must satisfy 0 < min_ratio <= max_ratio <= 1, got [{}, {}]",
                self.min_ratio, self.max_ratio
            )));
        }
        if !self.default_ratio.is_finite() {
            return Err(SummarizeError::InvalidConfig(
                "default_ratio must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a requested ratio: default when absent, clamped to the bounds.
    pub fn resolve_ratio(&self, requested: Option<f64>) -> Result<f64> {
        let ratio = requested.unwrap_or(self.default_ratio);
        if !ratio.is_finite() {
            return Err(SummarizeError::InvalidRatio(ratio));
        }
        Ok(ratio.clamp(self.min_ratio, self.max_ratio))
    }

    /// Whether a ratio falls inside the configured bounds.
    pub fn ratio_in_bounds(&self, ratio: f64) -> bool {
        ratio >= self.min_ratio && ratio <= self.max_ratio
    }
}
