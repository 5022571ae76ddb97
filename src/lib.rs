//! # rapid_summarizer
//!
//! Extractive summarization: picks a subset of a document's own sentences
//! under a target compression ratio, keeping their source order.
//!
//! Sentences are scored by TextRank over a Jaccard similarity graph, by
//! TF-IDF over the document's sentences, or by the mean of both after min-max
//! normalization.
//!
//! ## Quick start
//!
//! ```rust
//! use rapid_summarizer::{ModelType, Summarizer};
//!
//! let summarizer = Summarizer::default();
//! let text = "Rust is a systems programming language. \
//!             It guarantees memory safety without a garbage collector. \
//!             The borrow checker enforces memory safety at compile time.";
//!
//! let result = summarizer
//!     .summarize(text, ModelType::Ensemble, Some(0.3), "english")
//!     .unwrap();
//! assert_eq!(result.sentence_count(), 1);
//! ```
//!
//! A [`LanguageRegistry`] is expensive to build; construct it once and share
//! it between summarizers with an `Arc`.

pub mod errors;
pub mod evaluation;
pub mod extract;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod scoring;
pub mod summarizer;
pub mod types;

pub use errors::{ErrorCode, Result, SummarizeError};
pub use evaluation::{RougeEvaluator, RougeScores};
pub use extract::{DocumentExtractor, DocumentFormat, PlainTextExtractor};
pub use nlp::{LanguageRegistry, LanguageResources};
pub use pipeline::{SummarizationRequest, SummarizationResponse};
pub use summarizer::{BenchmarkEntry, BenchmarkReport, Summarizer};
pub use types::{
    Language, ModelType, RankedList, ScoreVector, Sentence, SummarizerConfig, SummaryResult,
    TextRankConfig, TfIdfAggregation, TfIdfConfig,
};
