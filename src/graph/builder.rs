//! Sentence similarity graph builder
//!
//! Nodes are sentence indices; an undirected edge joins two sentences whose
//! token sets overlap, weighted by their Jaccard similarity. Adjacency uses
//! FxHashMap for O(1) edge lookups during construction.

use crate::types::Sentence;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable graph builder over a fixed set of sentence nodes
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

/// Jaccard similarity of two term sets: |A ∩ B| / |A ∪ B|, 0 when either is empty
pub fn jaccard_similarity(a: &FxHashSet<&str>, b: &FxHashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|t| large.contains(*t)).count();
    if shared == 0 {
        return 0.0;
    }
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

fn term_sets(sentences: &[Sentence]) -> Vec<FxHashSet<&str>> {
    sentences
        .iter()
        .map(|s| s.tokens.iter().map(String::as_str).collect())
        .collect()
}

/// Edges (i, j, w) with i < j and w > 0 for row `i`
fn row_edges(sets: &[FxHashSet<&str>], i: usize) -> Vec<(u32, u32, f64)> {
    ((i + 1)..sets.len())
        .filter_map(|j| {
            let w = jaccard_similarity(&sets[i], &sets[j]);
            (w > 0.0).then_some((i as u32, j as u32, w))
        })
        .collect()
}

impl GraphBuilder {
    /// Create a builder with `n` isolated nodes
    pub fn with_nodes(n: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); n],
        }
    }

    /// Set the undirected edge weight between two nodes
    ///
    /// Self-loops, non-positive weights and unknown nodes are ignored.
    pub fn set_edge(&mut self, a: u32, b: u32, weight: f64) {
        if a == b || weight <= 0.0 {
            return;
        }
        if (a as usize) >= self.nodes.len() || (b as usize) >= self.nodes.len() {
            return;
        }

        self.nodes[a as usize].edges.insert(b, weight);
        self.nodes[b as usize].edges.insert(a, weight);
    }

    /// Build the similarity graph of a document's sentences
    ///
    /// Every unordered pair is compared once. Sentences without any shared
    /// term stay isolated.
    pub fn from_sentences(sentences: &[Sentence]) -> Self {
        let sets = term_sets(sentences);
        let mut builder = Self::with_nodes(sentences.len());

        for i in 0..sets.len() {
            for (a, b, w) in row_edges(&sets, i) {
                builder.set_edge(a, b, w);
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Edge weight between two nodes (0.0 when absent)
    pub fn weight(&self, a: u32, b: u32) -> f64 {
        self.get_node(a)
            .and_then(|n| n.edges.get(&b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the similarity graph, comparing rows in parallel for long documents
///
/// Below `parallel_threshold` sentences the sequential builder is faster.
/// Rows are collected in order, so the result is identical either way.
pub fn build_graph_parallel(sentences: &[Sentence], parallel_threshold: usize) -> GraphBuilder {
    if sentences.len() < parallel_threshold {
        return GraphBuilder::from_sentences(sentences);
    }

    let sets = term_sets(sentences);
    let rows: Vec<Vec<(u32, u32, f64)>> = (0..sets.len())
        .into_par_iter()
        .map(|i| row_edges(&sets, i))
        .collect();

    let mut builder = GraphBuilder::with_nodes(sentences.len());
    for (a, b, w) in rows.into_iter().flatten() {
        builder.set_edge(a, b, w);
    }

    builder
}
