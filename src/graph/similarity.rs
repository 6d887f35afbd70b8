//! Dense pairwise cosine similarity between sentence vectors
//!
//! The matrix is symmetric with a zero diagonal, so the sentence graph has
//! no self-loops. Pairs involving a zero vector (an empty or fully
//! out-of-vocabulary sentence) get similarity 0 instead of NaN.

use rayon::prelude::*;

/// Below this many sentences, rows are computed sequentially
const PARALLEL_MIN_NODES: usize = 128;

/// Cosine similarity of two vectors, 0 when either has zero norm
///
/// The result is clamped to [-1, 1] to absorb floating-point overshoot.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// A dense, symmetric N×N similarity matrix stored row-major
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// All-zero matrix for `size` sentences
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Build from explicit rows, enforcing a zero diagonal
    ///
    /// Returns `None` if the rows do not form a square matrix. Symmetry is
    /// not checked; callers passing an asymmetric matrix get a directed
    /// graph.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let mut values: Vec<f64> = rows.into_iter().flatten().collect();
        for i in 0..size {
            values[i * size + i] = 0.0;
        }
        Some(Self { size, values })
    }

    /// Number of sentences (rows)
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between sentences `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    /// Borrow row `i`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.size).map(move |i| self.row(i))
    }
}

/// Compute the pairwise cosine similarity matrix of `vectors`
///
/// Only the upper triangle is computed; it is mirrored into the lower one.
pub fn build_similarity<V: AsRef<[f64]> + Sync>(vectors: &[V]) -> SimilarityMatrix {
    let n = vectors.len();
    let mut matrix = SimilarityMatrix::zeros(n);
    if n < 2 {
        return matrix;
    }

    let upper_row = |i: usize| -> Vec<f64> {
        let vi = vectors[i].as_ref();
        ((i + 1)..n)
            .map(|j| cosine_similarity(vi, vectors[j].as_ref()))
            .collect()
    };

    let upper: Vec<Vec<f64>> = if n < PARALLEL_MIN_NODES {
        (0..n).map(upper_row).collect()
    } else {
        (0..n).into_par_iter().map(upper_row).collect()
    };

    for (i, row) in upper.into_iter().enumerate() {
        for (offset, sim) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            matrix.values[i * n + j] = sim;
            matrix.values[j * n + i] = sim;
        }
    }

    matrix
}
