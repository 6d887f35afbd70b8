//! Sentence vectorization by averaging word embeddings
//!
//! A sentence vector is the arithmetic mean of the vectors of the words that
//! resolved in the lookup. Out-of-vocabulary words are skipped rather than
//! zero-padded, so they do not dilute the words that did resolve.

use rayon::prelude::*;

use super::EmbeddingLookup;
use crate::types::Sentence;

/// Below this many sentences, batch vectorization stays sequential
const PARALLEL_MIN_SENTENCES: usize = 256;

/// Outcome of vectorizing one sentence
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceVector {
    /// Mean embedding over hits, or all zeros
    pub values: Vec<f64>,
    /// Words found in the lookup
    pub hits: usize,
    /// Words missing from the lookup
    pub misses: usize,
}

impl AsRef<[f64]> for SentenceVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl SentenceVector {
    /// True if no word resolved and the vector is all zeros
    pub fn is_degenerate(&self) -> bool {
        self.hits == 0
    }
}

/// Average the embeddings of `words`
///
/// Returns the zero vector of length `dim` when there are no words or none
/// of them resolve. A lookup result whose length differs from `dim` counts
/// as a miss.
pub fn vectorize<'w, L>(
    words: impl IntoIterator<Item = &'w str>,
    lookup: &L,
    dim: usize,
) -> Vec<f64>
where
    L: EmbeddingLookup + ?Sized,
{
    vectorize_counted(words, lookup, dim).values
}

/// Same as [`vectorize`], also reporting hit and miss counts
pub fn vectorize_counted<'w, L>(
    words: impl IntoIterator<Item = &'w str>,
    lookup: &L,
    dim: usize,
) -> SentenceVector
where
    L: EmbeddingLookup + ?Sized,
{
    let mut sum = vec![0.0; dim];
    let mut hits = 0usize;
    let mut misses = 0usize;

    for word in words {
        match lookup.get(word) {
            Some(v) if v.len() == dim => {
                for (acc, x) in sum.iter_mut().zip(v) {
                    *acc += x;
                }
                hits += 1;
            }
            Some(_v) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(word, len = _v.len(), dim, "embedding has the wrong length");
                misses += 1;
            }
            None => misses += 1,
        }
    }

    if hits > 0 {
        let n = hits as f64;
        for acc in &mut sum {
            *acc /= n;
        }
    }

    SentenceVector {
        values: sum,
        hits,
        misses,
    }
}

/// Vectorizes whole documents against one embedding lookup
#[derive(Debug)]
pub struct SentenceVectorizer<'a, L: ?Sized> {
    lookup: &'a L,
    dimension: usize,
}

impl<'a, L> SentenceVectorizer<'a, L>
where
    L: EmbeddingLookup + Sync + ?Sized,
{
    /// Create a vectorizer producing vectors of `dimension` components
    pub fn new(lookup: &'a L, dimension: usize) -> Self {
        Self { lookup, dimension }
    }

    /// Vector dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Vectorize a single sentence's cleaned text
    pub fn vectorize_sentence(&self, sentence: &Sentence) -> SentenceVector {
        vectorize_counted(sentence.words(), self.lookup, self.dimension)
    }

    /// Vectorize every sentence, preserving input order
    ///
    /// Large documents are processed in parallel; the output is identical
    /// either way.
    pub fn vectorize_all(&self, sentences: &[Sentence]) -> Vec<SentenceVector> {
        let vectors: Vec<SentenceVector> = if sentences.len() < PARALLEL_MIN_SENTENCES {
            sentences.iter().map(|s| self.vectorize_sentence(s)).collect()
        } else {
            sentences
                .par_iter()
                .map(|s| self.vectorize_sentence(s))
                .collect()
        };

        #[cfg(feature = "tracing")]
        {
            let hits: usize = vectors.iter().map(|v| v.hits).sum();
            let misses: usize = vectors.iter().map(|v| v.misses).sum();
            let degenerate = vectors.iter().filter(|v| v.is_degenerate()).count();
            tracing::debug!(
                sentences = sentences.len(),
                hits,
                misses,
                degenerate,
                "vectorized sentences"
            );
        }

        vectors
    }
}
