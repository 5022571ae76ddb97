//! Sentence selection and summary assembly
//!
//! Takes the top-k sentences of a [`RankedList`], restores source order and
//! joins their text. Summary statistics are whitespace word counts.

use crate::nlp::tokenizer::word_count;
use crate::types::{RankedList, Sentence};

/// Number of sentences to keep: `max(1, round(ratio * n))`, at most `n`.
///
/// `f64::round` rounds halves away from zero, so 2.5 becomes 3.
pub fn target_count(ratio: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    if n == 1 {
        return 1;
    }
    let k = (ratio * n as f64).round();
    if k.is_nan() || k < 1.0 {
        1
    } else {
        (k as usize).min(n)
    }
}

/// An assembled summary
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Chosen sentence indices, ascending
    pub indices: Vec<usize>,
    /// Chosen sentence texts in source order
    pub sentences: Vec<String>,
    pub summary: String,
    pub summary_length: usize,
}

/// Top-k selector and assembler
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSelector {
    preserve_paragraphs: bool,
}

impl SentenceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Separate sentences from different paragraphs with a blank line
    pub fn with_preserve_paragraphs(mut self, preserve: bool) -> Self {
        self.preserve_paragraphs = preserve;
        self
    }

    /// Select `k` sentences from `ranked` and assemble them in source order
    pub fn select(&self, sentences: &[Sentence], ranked: &RankedList, k: usize) -> Selection {
        let mut indices = ranked.top(k).to_vec();
        indices.sort_unstable();

        let chosen: Vec<&Sentence> = indices.iter().filter_map(|&i| sentences.get(i)).collect();
        let summary = self.assemble(&chosen);

        Selection {
            indices,
            sentences: chosen.iter().map(|s| s.raw.clone()).collect(),
            summary_length: word_count(&summary),
            summary,
        }
    }

    fn assemble(&self, chosen: &[&Sentence]) -> String {
        let mut summary = String::new();
        let mut previous: Option<usize> = None;

        for sentence in chosen {
            if let Some(paragraph) = previous {
                if self.preserve_paragraphs && paragraph != sentence.paragraph {
                    summary.push_str("\n\n");
                } else {
                    summary.push(' ');
                }
            }
            summary.push_str(&sentence.raw);
            previous = Some(sentence.paragraph);
        }

        summary
    }
}

/// `summary_length / original_length`, 0 for an empty original
pub fn compression_ratio(original_length: usize, summary_length: usize) -> f64 {
    if original_length == 0 {
        0.0
    } else {
        summary_length as f64 / original_length as f64
    }
}
