//! Core types shared across the summarization pipeline.

use serde::{Deserialize, Serialize};

use crate::pipeline::errors::ConfigError;
use crate::pipeline::spec::SummarySpec;
use crate::pipeline::validation::ValidationEngine;

/// Default PageRank damping factor
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Default L1 convergence threshold for power iteration
pub const DEFAULT_THRESHOLD: f64 = 1e-4;
/// Default iteration cap for power iteration
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// A sentence as produced by the upstream cleaner
///
/// `original` is what ends up in the summary; `cleaned` is what gets
/// vectorized. The sentence's identity is its position in the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Verbatim text, suitable for display
    pub original: String,
    /// Whitespace-tokenizable text used for embedding lookups
    pub cleaned: String,
}

impl Sentence {
    /// Create a sentence from its original and cleaned forms
    pub fn new(original: impl Into<String>, cleaned: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            cleaned: cleaned.into(),
        }
    }

    /// Create a sentence whose cleaned form is the original text
    pub fn verbatim(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            cleaned: text.clone(),
            original: text,
        }
    }

    /// Iterate over the words of the cleaned text
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.cleaned.split_whitespace()
    }
}

/// Parameters for one summarization run
///
/// There is no `Default`: `embedding_dimension` must match the embedding
/// source and `size_summary` is always the caller's choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Dimension of every embedding vector
    pub embedding_dimension: usize,
    /// PageRank damping factor, in (0, 1)
    pub damping_factor: f64,
    /// L1 change below which power iteration stops
    pub convergence_threshold: f64,
    /// Hard cap on power iterations
    pub max_iterations: usize,
    /// Number of sentences in the summary
    pub size_summary: usize,
}

impl SummaryConfig {
    /// Create a config with the standard PageRank parameters
    pub fn new(embedding_dimension: usize, size_summary: usize) -> Self {
        Self {
            embedding_dimension,
            damping_factor: DEFAULT_DAMPING,
            convergence_threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            size_summary,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping_factor = damping;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the summary size
    pub fn with_size_summary(mut self, size_summary: usize) -> Self {
        self.size_summary = size_summary;
        self
    }

    /// Check the config against the default validation rules
    ///
    /// Warnings are ignored; the first error is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spec = SummarySpec::from(self);
        ValidationEngine::with_defaults()
            .validate(&spec)
            .into_result()
    }
}

/// A sentence picked for the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSentence {
    /// Position in the input sequence
    pub index: usize,
    /// Original sentence text
    pub text: String,
    /// Centrality score from the ranker
    pub score: f64,
}

/// Ranked extractive summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Selected sentences, highest score first
    pub sentences: Vec<SelectedSentence>,
    /// Power iterations performed by the ranker
    pub iterations: usize,
    /// Whether the ranker converged before the iteration cap
    pub converged: bool,
}

impl Summary {
    /// Number of selected sentences
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Borrow the selected texts in ranked order
    pub fn texts(&self) -> Vec<&str> {
        self.sentences.iter().map(|s| s.text.as_str()).collect()
    }

    /// Consume the summary, returning the texts in ranked order
    pub fn into_texts(self) -> Vec<String> {
        self.sentences.into_iter().map(|s| s.text).collect()
    }
}
