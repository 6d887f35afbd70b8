//! Word embeddings and sentence vectorization
//!
//! Embedding tables are supplied by the caller: this crate never loads them
//! from disk and never keeps one in a global. An [`EmbeddingLookup`] is an
//! explicitly-owned resource passed by reference into each run.

pub mod vectorizer;

use std::collections::HashMap;

use rustc_hash::FxHashMap;

/// Read-only word → vector lookup with partial vocabulary coverage
pub trait EmbeddingLookup {
    /// Vector for `word`, or `None` if the word is out of vocabulary
    fn get(&self, word: &str) -> Option<&[f64]>;

    /// Dimension of the vectors this lookup returns, if known
    fn dimension(&self) -> Option<usize>;
}

/// In-memory embedding table keyed by lowercase token
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    dimension: usize,
    vectors: FxHashMap<String, Vec<f64>>,
}

impl EmbeddingTable {
    /// Create an empty table for vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: FxHashMap::default(),
        }
    }

    /// Create an empty table with pre-allocated capacity
    pub fn with_capacity(dimension: usize, capacity: usize) -> Self {
        Self {
            dimension,
            vectors: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a vector, lowercasing the key
    ///
    /// Returns `false` (and stores nothing) if the vector has the wrong length.
    pub fn insert(&mut self, word: &str, vector: Vec<f64>) -> bool {
        if vector.len() != self.dimension {
            return false;
        }
        self.vectors.insert(word.to_lowercase(), vector);
        true
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Check if a word has a vector
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }
}

impl EmbeddingLookup for EmbeddingTable {
    fn get(&self, word: &str) -> Option<&[f64]> {
        if let Some(v) = self.vectors.get(word) {
            return Some(v.as_slice());
        }
        if word.chars().any(char::is_uppercase) {
            return self.vectors.get(&word.to_lowercase()).map(Vec::as_slice);
        }
        None
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }
}

impl<'a> FromIterator<(&'a str, Vec<f64>)> for EmbeddingTable {
    /// Build a table whose dimension is taken from the first vector
    ///
    /// Later vectors of a different length are dropped.
    fn from_iter<I: IntoIterator<Item = (&'a str, Vec<f64>)>>(iter: I) -> Self {
        let mut iter = iter.into_iter().peekable();
        let dimension = iter.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let mut table = Self::with_capacity(dimension, iter.size_hint().0);
        for (word, vector) in iter {
            table.insert(word, vector);
        }
        table
    }
}

/// Plain maps work as lookups too. Their dimension is known only when every
/// vector has the same length; otherwise it is unknown and stray entries of
/// the wrong length are counted as misses by the vectorizer.
impl<S: std::hash::BuildHasher> EmbeddingLookup for HashMap<String, Vec<f64>, S> {
    fn get(&self, word: &str) -> Option<&[f64]> {
        HashMap::get(self, word).map(Vec::as_slice)
    }

    fn dimension(&self) -> Option<usize> {
        let mut lengths = self.values().map(Vec::len);
        let first = lengths.next()?;
        lengths.all(|len| len == first).then_some(first)
    }
}

impl<T: EmbeddingLookup + ?Sized> EmbeddingLookup for &T {
    fn get(&self, word: &str) -> Option<&[f64]> {
        (**self).get(word)
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}
