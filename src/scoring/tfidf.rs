//! TF-IDF sentence scoring
//!
//! Treats the document's sentences as a miniature corpus: term frequency is
//! computed within a sentence, inverse frequency across sentences. Each
//! sentence becomes a sparse term-weight vector that is folded into a single
//! score according to [`TfIdfAggregation`].

use rustc_hash::FxHashMap;

use super::SentenceScorer;
use crate::types::{ScoreVector, Sentence, TfIdfAggregation, TfIdfConfig};

/// A sparse term-weight vector
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    /// Non-zero dimensions: term -> weight
    pub weights: FxHashMap<String, f64>,
}

impl TermVector {
    /// Sum of all weights
    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// L2 norm
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Cosine similarity with another vector (0 when either is empty)
    pub fn cosine_similarity(&self, other: &TermVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        let mut dot = 0.0;
        for (term, value) in &self.weights {
            if let Some(other_value) = other.weights.get(term) {
                dot += value * other_value;
            }
        }
        dot / denom
    }

    /// Mean of several vectors
    pub fn centroid(vectors: &[TermVector]) -> TermVector {
        let mut weights: FxHashMap<String, f64> = FxHashMap::default();
        if vectors.is_empty() {
            return TermVector { weights };
        }
        for v in vectors {
            for (term, w) in &v.weights {
                *weights.entry(term.clone()).or_insert(0.0) += w;
            }
        }
        let n = vectors.len() as f64;
        for w in weights.values_mut() {
            *w /= n;
        }
        TermVector { weights }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// TF-IDF scorer
#[derive(Debug, Clone, Default)]
pub struct TfIdfScorer {
    config: TfIdfConfig,
}

impl TfIdfScorer {
    pub fn new(config: TfIdfConfig) -> Self {
        Self { config }
    }

    /// Inverse sentence frequency for every term of the document
    pub fn inverse_frequencies(&self, sentences: &[Sentence]) -> FxHashMap<String, f64> {
        let mut df: FxHashMap<&str, usize> = FxHashMap::default();
        for sentence in sentences {
            let mut seen: Vec<&str> = sentence.tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let n = sentences.len() as f64;
        df.into_iter()
            .map(|(term, count)| (term.to_string(), self.idf(n, count)))
            .collect()
    }

    fn idf(&self, n: f64, doc_freq: usize) -> f64 {
        if !self.config.use_idf {
            return 1.0;
        }
        if doc_freq < self.config.min_df || doc_freq == 0 {
            return 0.0;
        }
        let df = doc_freq as f64;
        if self.config.smooth_idf {
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        } else {
            (n / df).ln()
        }
    }

    /// Build the TF-IDF vector of one sentence
    pub fn sentence_vector(&self, sentence: &Sentence, idf: &FxHashMap<String, f64>) -> TermVector {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for term in &sentence.tokens {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }

        let total = sentence.tokens.len().max(1) as f64;
        let weights = counts
            .into_iter()
            .filter_map(|(term, count)| {
                let tf = if self.config.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64 / total
                };
                let weight = tf * idf.get(term).copied().unwrap_or(0.0);
                (weight != 0.0).then(|| (term.to_string(), weight))
            })
            .collect();

        TermVector { weights }
    }

    fn length_normalized(&self, score: f64, sentence: &Sentence) -> f64 {
        if self.config.length_normalize && !sentence.tokens.is_empty() {
            score / sentence.tokens.len() as f64
        } else {
            score
        }
    }
}

impl SentenceScorer for TfIdfScorer {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn score(&self, sentences: &[Sentence]) -> ScoreVector {
        let idf = self.inverse_frequencies(sentences);
        let vectors: Vec<TermVector> = sentences
            .iter()
            .map(|s| self.sentence_vector(s, &idf))
            .collect();

        let scores = match self.config.aggregation {
            TfIdfAggregation::Sum => vectors
                .iter()
                .zip(sentences)
                .map(|(v, s)| self.length_normalized(v.sum(), s))
                .collect(),
            TfIdfAggregation::L2Norm => vectors
                .iter()
                .zip(sentences)
                .map(|(v, s)| self.length_normalized(v.norm(), s))
                .collect(),
            TfIdfAggregation::Centroid => {
                let centroid = TermVector::centroid(&vectors);
                vectors
                    .iter()
                    .map(|v| v.cosine_similarity(&centroid))
                    .collect()
            }
        };

        ScoreVector::new(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(index: usize, tokens: &[&str]) -> Sentence {
        Sentence::new(
            index,
            0,
            tokens.join(" "),
            tokens.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn sample() -> Vec<Sentence> {
        vec![
            sentence(0, &["rust", "memori", "safeti"]),
            sentence(1, &["rust", "compil"]),
            sentence(2, &["rust", "rust", "rust"]),
        ]
    }

    #[test]
    fn test_smoothed_idf_values() {
        let idf = TfIdfScorer::default().inverse_frequencies(&sample());

        // Present in every sentence: ln(4/4) + 1
        assert!((idf["rust"] - 1.0).abs() < 1e-12);
        // Present in one of three: ln(4/2) + 1
        assert!((idf["compil"] - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unsmoothed_idf_zeroes_ubiquitous_terms() {
        let scorer = TfIdfScorer::new(TfIdfConfig {
            smooth_idf: false,
            ..TfIdfConfig::default()
        });
        let idf = scorer.inverse_frequencies(&sample());
        assert_eq!(idf["rust"], 0.0);
        assert!((idf["safeti"] - 3.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_rare_terms_score_higher() {
        let scores = TfIdfScorer::default().score(&sample());

        assert_eq!(scores.len(), 3);
        // Sentence 2 repeats only the ubiquitous term
        assert!(scores.get(0) > scores.get(2));
        assert!(scores.get(1) > scores.get(2));
    }

    #[test]
    fn test_sum_with_length_normalization() {
        let scores = TfIdfScorer::default().score(&sample());
        // tf = 1.0, idf = 1.0, divided by 3 tokens
        assert!((scores.get(2) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sentence_scores_zero() {
        let sentences = vec![sentence(0, &["word"]), sentence(1, &[])];
        let scores = TfIdfScorer::default().score(&sentences);
        assert_eq!(scores.get(1), 0.0);
        assert!(scores.get(0) > 0.0);
    }

    #[test]
    fn test_min_df_filters_rare_terms() {
        let scorer = TfIdfScorer::new(TfIdfConfig {
            min_df: 2,
            ..TfIdfConfig::default()
        });
        let idf = scorer.inverse_frequencies(&sample());
        assert_eq!(idf["compil"], 0.0);
        assert!(idf["rust"] > 0.0);
    }

    #[test]
    fn test_l2_and_centroid_aggregations() {
        let l2 = TfIdfScorer::new(TfIdfConfig {
            aggregation: TfIdfAggregation::L2Norm,
            length_normalize: false,
            ..TfIdfConfig::default()
        })
        .score(&sample());
        // Single term with tf 1.0 and idf 1.0
        assert!((l2.get(2) - 1.0).abs() < 1e-12);

        let centroid = TfIdfScorer::new(TfIdfConfig {
            aggregation: TfIdfAggregation::Centroid,
            ..TfIdfConfig::default()
        })
        .score(&sample());
        for i in 0..3 {
            assert!((0.0..=1.0 + 1e-12).contains(&centroid.get(i)));
        }
    }

    #[test]
    fn test_cosine_similarity() {
        let mut a = TermVector::default();
        a.weights.insert("x".into(), 3.0);
        a.weights.insert("y".into(), 4.0);
        assert!((a.norm() - 5.0).abs() < 1e-12);
        assert!((a.cosine_similarity(&a) - 1.0).abs() < 1e-12);
        assert_eq!(a.cosine_similarity(&TermVector::default()), 0.0);
    }
}
