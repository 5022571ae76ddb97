//! ROUGE evaluation of a summary against a reference summary.
//!
//! Recall-oriented n-gram overlap on lower-cased whitespace tokens:
//! `clipped matches / reference n-gram count`.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// ROUGE-1, ROUGE-2 and their mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RougeScores {
    pub rouge_1: f64,
    pub rouge_2: f64,
    pub average_rouge: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RougeEvaluator;

impl RougeEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// ROUGE-N recall; 0.0 when the reference has fewer than `n` tokens.
    pub fn rouge_n(&self, reference: &str, summary: &str, n: usize) -> f64 {
        let reference_tokens = lowercase_tokens(reference);
        let summary_tokens = lowercase_tokens(summary);
        let reference_ngrams = ngram_counts(&reference_tokens, n);
        let summary_ngrams = ngram_counts(&summary_tokens, n);

        let total: usize = reference_ngrams.values().sum();
        if total == 0 {
            return 0.0;
        }

        let matches: usize = summary_ngrams
            .iter()
            .map(|(gram, &count)| count.min(reference_ngrams.get(gram).copied().unwrap_or(0)))
            .sum();

        matches as f64 / total as f64
    }

    pub fn evaluate(&self, reference: &str, summary: &str) -> RougeScores {
        let rouge_1 = self.rouge_n(reference, summary, 1);
        let rouge_2 = self.rouge_n(reference, summary, 2);
        RougeScores {
            rouge_1,
            rouge_2,
            average_rouge: (rouge_1 + rouge_2) / 2.0,
        }
    }
}

fn lowercase_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> FxHashMap<&[String], usize> {
    let mut counts = FxHashMap::default();
    if n == 0 {
        return counts;
    }
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}
