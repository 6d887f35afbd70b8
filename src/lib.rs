//! # comment-summarizer
//!
//! Extractive summaries of free-text survey comments.
//!
//! Each sentence is represented by the mean of its words' embedding
//! vectors, sentences are linked by cosine similarity, and PageRank picks
//! the most central ones. The summary is the top-N original sentences,
//! highest score first.
//!
//! ```no_run
//! use comment_summarizer::{summarize, EmbeddingTable, Sentence, SummaryConfig};
//!
//! let table: EmbeddingTable = vec![
//!     ("cat", vec![1.0, 0.0]),
//!     ("dog", vec![0.9, 0.1]),
//!     ("stocks", vec![0.0, 1.0]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let sentences = vec![
//!     Sentence::new("The cat sat.", "cat sat"),
//!     Sentence::new("The dog sat.", "dog sat"),
//!     Sentence::new("Stocks fell.", "stocks fell"),
//! ];
//!
//! let summary = summarize(&sentences, &table, SummaryConfig::new(2, 1)).unwrap();
//! assert_eq!(summary.len(), 1);
//! ```

pub mod embedding;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use embedding::{EmbeddingLookup, EmbeddingTable};
pub use nlp::cleaner::BasicCleaner;
pub use nlp::stopwords::StopwordFilter;
pub use pipeline::error_code::ErrorCode;
pub use pipeline::errors::ConfigError;
pub use pipeline::runner::Summarizer;
pub use pipeline::spec::SummarySpec;
pub use summarizer::selector::select_summary;
pub use types::{SelectedSentence, Sentence, Summary, SummaryConfig};

/// Summarize one document with the standard pipeline.
///
/// Returns the selected original sentences, most central first.
pub fn summarize<L>(
    sentences: &[Sentence],
    lookup: &L,
    config: SummaryConfig,
) -> Result<Vec<String>, ConfigError>
where
    L: EmbeddingLookup + Sync + ?Sized,
{
    let summary = Summarizer::new(config)?.summarize(sentences, lookup)?;
    Ok(summary.into_texts())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_top_level() {
        let table: EmbeddingTable = vec![
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.9, 0.1]),
            ("stocks", vec![0.0, 1.0]),
        ]
        .into_iter()
        .collect();
        let sentences = vec![
            Sentence::new("The cat sat.", "cat"),
            Sentence::new("The dog sat.", "dog"),
            Sentence::new("Stocks fell.", "stocks"),
        ];

        let texts = summarize(&sentences, &table, SummaryConfig::new(2, 5)).unwrap();

        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2], "Stocks fell.");
    }

    #[test]
    fn test_summarize_rejects_bad_config() {
        let table = EmbeddingTable::new(2);
        let err = summarize(&[], &table, SummaryConfig::new(2, 1).with_damping(0.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }
}
