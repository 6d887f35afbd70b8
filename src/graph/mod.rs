//! Sentence graph construction and representation
//!
//! Sentence vectors are compared pairwise into a dense similarity matrix,
//! which is then stored as a CSR graph for the ranker.

pub mod csr;
pub mod similarity;
