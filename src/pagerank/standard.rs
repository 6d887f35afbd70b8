//! Standard PageRank algorithm
//!
//! Implements the classic PageRank with power iteration over a weighted
//! sentence graph. A dangling node (a sentence with no positive similarity
//! to any other) spreads its mass uniformly over all *other* nodes, so no
//! probability is lost and the node does not feed itself.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;
use crate::graph::similarity::SimilarityMatrix;
use crate::types::{SummaryConfig, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD};

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change between iterations
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, threshold and iteration cap from a summary config
    pub fn from_config(cfg: &SummaryConfig) -> Self {
        Self {
            damping: cfg.damping_factor,
            max_iterations: cfg.max_iterations,
            threshold: cfg.convergence_threshold,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Rank the sentences of a similarity matrix
    pub fn rank(&self, matrix: &SimilarityMatrix) -> PageRankResult {
        self.run(&CsrGraph::from_similarity(matrix))
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with
    /// `converged=false`. Scores are not re-normalized afterwards.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }
        if n == 1 {
            return PageRankResult::new(vec![1.0], 0, 0.0, true);
        }

        // Initialize scores uniformly
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();
        let mut is_dangling = vec![false; n];
        for &d in &dangling_nodes {
            is_dangling[d as usize] = true;
        }

        let teleport = (1.0 - self.damping) / n as f64;
        let others = (n - 1) as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            // Dangling mass goes to every node except its source
            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            for (i, slot) in new_scores.iter_mut().enumerate() {
                let own = if is_dangling[i] { scores[i] } else { 0.0 };
                *slot = teleport + self.damping * (dangling_mass - own) / others;
            }

            // Propagate scores through edges
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] +=
                            self.damping * node_score * weight / total_weight;
                    }
                }
            }

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);
        }

        PageRankResult::new(scores, iterations, delta, delta <= self.threshold)
    }
}
