//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one pluggable stage boundary. Implementations are
//! statically dispatched; the zero-sized defaults cost nothing.

use crate::graph::similarity::SimilarityMatrix;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;
use crate::types::{Sentence, SummaryConfig};

// ============================================================================
// Preprocessor: optional sentence cleanup (stage 0)
// ============================================================================

/// Optional preprocessing stage that derives `cleaned` text.
///
/// Sentences normally arrive already cleaned by an upstream collaborator,
/// so the provided [`NoopPreprocessor`] is the default. A preprocessor may
/// rewrite `cleaned` from `original`; it must never touch `original`, which
/// is what ends up in the summary, and it must not reorder or drop
/// sentences, since a sentence's identity is its position.
///
/// # Contract
///
/// - **Input**: a mutable slice of sentences (modify in place).
/// - **Idempotent**: calling `preprocess` twice should produce the same
///   result as calling it once.
pub trait Preprocessor {
    /// Preprocess the sentences in place.
    fn preprocess(&self, sentences: &mut [Sentence], cfg: &SummaryConfig);
}

/// Preprocessor that leaves sentences untouched. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn preprocess(&self, _sentences: &mut [Sentence], _cfg: &SummaryConfig) {
        // Intentionally empty.
    }
}

// ============================================================================
// Ranker: centrality scores from the similarity matrix (stage 3)
// ============================================================================

/// Computes one score per sentence from the similarity matrix.
///
/// Implementations must not fail: a ranking that did not converge is still
/// returned, flagged through [`PageRankResult::converged`].
pub trait Ranker {
    fn rank(&self, matrix: &SimilarityMatrix, cfg: &SummaryConfig) -> PageRankResult;
}

/// Standard PageRank, parameterized per run from the [`SummaryConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRankRanker;

impl Ranker for PageRankRanker {
    fn rank(&self, matrix: &SimilarityMatrix, cfg: &SummaryConfig) -> PageRankResult {
        StandardPageRank::from_config(cfg).rank(matrix)
    }
}
