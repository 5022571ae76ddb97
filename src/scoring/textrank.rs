//! TextRank sentence scoring
//!
//! Builds the Jaccard similarity graph over sentences and runs PageRank on
//! it. Hitting the iteration cap is not an error: the last vector is used and
//! a warning is logged.

use super::SentenceScorer;
use crate::graph::builder::build_graph_parallel;
use crate::graph::csr::CsrGraph;
use crate::pagerank::StandardPageRank;
use crate::types::{ScoreVector, Sentence, TextRankConfig};

/// Scores plus graph and convergence diagnostics
#[derive(Debug, Clone)]
pub struct TextRankOutput {
    pub scores: ScoreVector,
    pub nodes: usize,
    /// Undirected edge count
    pub edges: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// TextRank scorer
#[derive(Debug, Clone, Default)]
pub struct TextRankScorer {
    config: TextRankConfig,
}

impl TextRankScorer {
    pub fn new(config: TextRankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TextRankConfig {
        &self.config
    }

    /// Build the similarity graph
    pub fn build_graph(&self, sentences: &[Sentence]) -> CsrGraph {
        let builder = build_graph_parallel(sentences, self.config.parallel_threshold);
        CsrGraph::from_builder(&builder)
    }

    /// Rank sentences, keeping graph and convergence diagnostics
    pub fn rank(&self, sentences: &[Sentence]) -> TextRankOutput {
        let graph = self.build_graph(sentences);

        #[cfg(feature = "tracing")]
        {
            let isolated = graph.isolated_nodes();
            if !isolated.is_empty() {
                tracing::debug!(?isolated, "sentences with no similar neighbor");
            }
        }

        let result = StandardPageRank::new()
            .with_damping(self.config.damping)
            .with_max_iterations(self.config.max_iterations)
            .with_threshold(self.config.convergence_threshold)
            .run(&graph);

        if !result.converged {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                iterations = result.iterations,
                delta = result.delta,
                sentences = sentences.len(),
                "textrank did not converge, using last iteration"
            );
        }

        TextRankOutput {
            nodes: graph.num_nodes,
            edges: graph.num_edges() / 2,
            iterations: result.iterations,
            converged: result.converged,
            scores: ScoreVector::new(result.scores),
        }
    }
}

impl SentenceScorer for TextRankScorer {
    fn name(&self) -> &'static str {
        "textrank"
    }

    fn score(&self, sentences: &[Sentence]) -> ScoreVector {
        self.rank(sentences).scores
    }
}
