//! Word-level sentence cleanup
//!
//! Produces the cleaned form of a comment sentence: lowercase, punctuation
//! stripped, runs of three or more identical characters shortened to two
//! ("sooooo" → "soo"), stopwords dropped.

use super::stopwords::StopwordFilter;
use crate::pipeline::traits::Preprocessor;
use crate::types::{Sentence, SummaryConfig};

/// Cleaner deriving `cleaned` from `original`
#[derive(Debug, Clone, Default)]
pub struct BasicCleaner {
    stopwords: StopwordFilter,
}

impl BasicCleaner {
    /// Cleaner using the short survey stopword list
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleaner using a custom stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Also drop `words`, on top of the current stopwords
    pub fn with_extra_stopwords(mut self, words: &[&str]) -> Self {
        self.stopwords.add_stopwords(words);
        self
    }

    /// Keep `words` even if they are on the stopword list
    pub fn keeping(mut self, words: &[&str]) -> Self {
        self.stopwords.remove_stopwords(words);
        self
    }

    /// Clean a single piece of text
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped: String = lowered
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        stripped
            .split_whitespace()
            .map(reduce_lengthening)
            .filter(|w| !self.stopwords.is_stopword(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Collapse any run of 3+ identical characters down to 2
fn reduce_lengthening(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev = None;
    let mut run = 0;
    for c in word.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}

impl Preprocessor for BasicCleaner {
    fn preprocess(&self, sentences: &mut [Sentence], _cfg: &SummaryConfig) {
        for sentence in sentences.iter_mut() {
            sentence.cleaned = self.clean(&sentence.original);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_punctuation_and_case() {
        let cleaner = BasicCleaner::new();
        assert_eq!(
            cleaner.clean("The workload, frankly, is TOO high!"),
            "the workload frankly is too high"
        );
    }

    #[test]
    fn test_clean_drops_survey_stopwords() {
        let cleaner = BasicCleaner::new();
        assert_eq!(
            cleaner.clean("Access to training and tools of the trade"),
            "access training tools the trade"
        );
    }

    #[test]
    fn test_clean_reduces_lengthening() {
        let cleaner = BasicCleaner::new();
        assert_eq!(cleaner.clean("sooooo goood"), "soo good");
    }

    #[test]
    fn test_clean_empty_and_punctuation_only() {
        let cleaner = BasicCleaner::new();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("?!..."), "");
    }

    #[test]
    fn test_custom_stopwords() {
        let cleaner = BasicCleaner::with_stopwords(StopwordFilter::new("en"));
        assert_eq!(
            cleaner.clean("The supervisor is knowledgeable"),
            "supervisor knowledgeable"
        );
    }

    #[test]
    fn test_extra_stopwords_extend_survey_list() {
        let cleaner = BasicCleaner::new().with_extra_stopwords(&["The", "is"]);
        assert_eq!(
            cleaner.clean("The workload is high and it shows"),
            "workload high shows"
        );
    }

    #[test]
    fn test_keeping_words_from_the_list() {
        let cleaner = BasicCleaner::with_stopwords(StopwordFilter::new("en")).keeping(&["not"]);
        assert_eq!(cleaner.clean("The pay is not fair"), "pay not fair");
    }

    #[test]
    fn test_preprocess_keeps_original_and_order() {
        let mut sentences = vec![
            Sentence::verbatim("Pay is fair."),
            Sentence::verbatim("Morale is LOW!!!"),
        ];
        let cleaner = BasicCleaner::new();
        cleaner.preprocess(&mut sentences, &SummaryConfig::new(3, 1));

        assert_eq!(sentences[0].original, "Pay is fair.");
        assert_eq!(sentences[0].cleaned, "pay is fair");
        assert_eq!(sentences[1].cleaned, "morale is low");

        // Idempotent on already-derived text
        let snapshot = sentences.clone();
        cleaner.preprocess(&mut sentences, &SummaryConfig::new(3, 1));
        assert_eq!(sentences, snapshot);
    }
}
