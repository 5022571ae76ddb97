//! Sentence scoring strategies
//!
//! Every scorer maps the preprocessed sentences of one document to a
//! [`ScoreVector`] with exactly one entry per sentence.

pub mod ensemble;
pub mod textrank;
pub mod tfidf;

pub use ensemble::fuse;
pub use textrank::{TextRankOutput, TextRankScorer};
pub use tfidf::{TermVector, TfIdfScorer};

use crate::types::{ScoreVector, Sentence};

/// A strategy that assigns an importance score to each sentence
pub trait SentenceScorer: Send + Sync {
    /// Short stable identifier used in logs
    fn name(&self) -> &'static str;

    /// Score every sentence; the result has `sentences.len()` entries
    fn score(&self, sentences: &[Sentence]) -> ScoreVector;
}
