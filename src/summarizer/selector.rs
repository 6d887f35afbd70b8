//! Top-N sentence selection for extractive summaries
//!
//! Sentences are ordered by descending centrality score. Exact ties go to the
//! sentence that appears first in the input, so the same input always yields
//! the same summary regardless of sort implementation. The output stays in
//! ranked order; it is not re-sorted into document order.

use std::cmp::Ordering;

use crate::types::SelectedSentence;

/// Top-N sentence selector
#[derive(Debug, Clone, Copy)]
pub struct SummarySelector {
    size_summary: usize,
}

impl SummarySelector {
    /// Create a selector returning at most `size_summary` sentences
    pub fn new(size_summary: usize) -> Self {
        Self { size_summary }
    }

    /// Maximum number of sentences returned
    pub fn size_summary(&self) -> usize {
        self.size_summary
    }

    /// Pick the top sentences, keeping index and score
    ///
    /// If `originals` and `scores` differ in length, the extra entries of the
    /// longer one are ignored.
    pub fn select<S: AsRef<str>>(&self, originals: &[S], scores: &[f64]) -> Vec<SelectedSentence> {
        if self.size_summary == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .take(originals.len())
            .copied()
            .enumerate()
            .collect();
        ranked.sort_by(compare_ranked);
        ranked.truncate(self.size_summary);

        ranked
            .into_iter()
            .map(|(index, score)| SelectedSentence {
                index,
                text: originals[index].as_ref().to_string(),
                score,
            })
            .collect()
    }
}

/// Descending score, then ascending index
fn compare_ranked(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Return the `size_summary` highest-scoring original sentences, best first
pub fn select_summary<S: AsRef<str>>(
    original_sentences: &[S],
    scores: &[f64],
    size_summary: usize,
) -> Vec<String> {
    SummarySelector::new(size_summary)
        .select(original_sentences, scores)
        .into_iter()
        .map(|s| s.text)
        .collect()
}
