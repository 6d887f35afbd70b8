//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Summarizer`] holds a validated [`SummaryConfig`] and a
//! statically-composed set of pluggable stages. Calling [`Summarizer::run`]
//! executes them in order, threading artifacts between stages and notifying
//! a [`PipelineObserver`] at each boundary:
//!
//! 0. Preprocess (derive cleaned text, optional no-op)
//! 1. Vectorize (mean word embedding per sentence)
//! 2. Similarity (dense cosine matrix, zero diagonal)
//! 3. Rank (PageRank power iteration)
//! 4. Select (top-N, ties by document order)
//!
//! Nothing survives between runs: every artifact is created inside `run`
//! and dropped when it returns.

use rayon::prelude::*;

use crate::embedding::vectorizer::SentenceVectorizer;
use crate::embedding::EmbeddingLookup;
use crate::graph::similarity::build_similarity;
use crate::pipeline::error_code::ErrorCode;
use crate::pipeline::errors::ConfigError;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder,
    STAGE_PREPROCESS, STAGE_RANK, STAGE_SELECT, STAGE_SIMILARITY, STAGE_VECTORIZE,
};
use crate::pipeline::traits::{NoopPreprocessor, PageRankRanker, Preprocessor, Ranker};
use crate::summarizer::selector::SummarySelector;
use crate::types::{Sentence, Summary, SummaryConfig};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Summarizer: statically-composed stage container
// ============================================================================

/// A summarization pipeline with a validated configuration.
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Pre` | [`Preprocessor`] | [`NoopPreprocessor`] |
/// | `Rnk` | [`Ranker`] | [`PageRankRanker`] |
#[derive(Debug, Clone)]
pub struct Summarizer<Pre = NoopPreprocessor, Rnk = PageRankRanker> {
    config: SummaryConfig,
    preprocessor: Pre,
    ranker: Rnk,
}

impl Summarizer {
    /// Build the standard TextRank summarizer.
    ///
    /// Fails fast if the config is invalid.
    pub fn new(config: SummaryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Summarizer {
            config,
            preprocessor: NoopPreprocessor,
            ranker: PageRankRanker,
        })
    }
}

impl<Pre, Rnk> Summarizer<Pre, Rnk> {
    /// The validated configuration.
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Replace the preprocessing stage.
    pub fn with_preprocessor<P: Preprocessor>(self, preprocessor: P) -> Summarizer<P, Rnk> {
        Summarizer {
            config: self.config,
            preprocessor,
            ranker: self.ranker,
        }
    }

    /// Replace the ranking stage.
    pub fn with_ranker<R: Ranker>(self, ranker: R) -> Summarizer<Pre, R> {
        Summarizer {
            config: self.config,
            preprocessor: self.preprocessor,
            ranker,
        }
    }
}

// ============================================================================
// Summarizer::run: execute stages in order
// ============================================================================

impl<Pre, Rnk> Summarizer<Pre, Rnk>
where
    Pre: Preprocessor,
    Rnk: Ranker,
{
    /// Execute the pipeline on one document, producing a [`Summary`].
    ///
    /// The only error is an embedding lookup whose dimension disagrees with
    /// the config. Empty input, unknown words, isolated sentences and
    /// non-convergence all produce a valid (possibly degraded) summary.
    pub fn run<L>(
        &self,
        mut sentences: Vec<Sentence>,
        lookup: &L,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary, ConfigError>
    where
        L: EmbeddingLookup + Sync + ?Sized,
    {
        self.check_lookup(lookup)?;
        let cfg = &self.config;

        // Stage 0: Preprocess
        trace_stage!(STAGE_PREPROCESS);
        observer.on_stage_start(STAGE_PREPROCESS);
        let clock = StageClock::start();
        self.preprocessor.preprocess(&mut sentences, cfg);
        observer.on_stage_end(STAGE_PREPROCESS, &StageReport::new(clock.elapsed()));

        // Stage 1: Vectorize
        trace_stage!(STAGE_VECTORIZE);
        observer.on_stage_start(STAGE_VECTORIZE);
        let clock = StageClock::start();
        let vectors = SentenceVectorizer::new(lookup, cfg.embedding_dimension)
            .vectorize_all(&sentences);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(vectors.len())
            .build();
        observer.on_stage_end(STAGE_VECTORIZE, &report);
        observer.on_vectors(&vectors);

        // Stage 2: Similarity matrix
        trace_stage!(STAGE_SIMILARITY);
        observer.on_stage_start(STAGE_SIMILARITY);
        let clock = StageClock::start();
        let matrix = build_similarity(&vectors);
        drop(vectors);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(matrix.len())
            .build();
        observer.on_stage_end(STAGE_SIMILARITY, &report);
        observer.on_similarity(&matrix);

        // Stage 3: Rank
        trace_stage!(STAGE_RANK);
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();
        let rank = self.ranker.rank(&matrix, cfg);
        drop(matrix);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(rank.scores.len())
            .iterations(rank.iterations)
            .converged(rank.converged)
            .build();
        observer.on_stage_end(STAGE_RANK, &report);
        observer.on_rank(&rank);

        #[cfg(feature = "tracing")]
        if !rank.converged {
            tracing::warn!(
                iterations = rank.iterations,
                delta = rank.delta,
                threshold = cfg.convergence_threshold,
                "pagerank hit the iteration cap before converging"
            );
        }

        // Stage 4: Select
        trace_stage!(STAGE_SELECT);
        observer.on_stage_start(STAGE_SELECT);
        let clock = StageClock::start();
        let originals: Vec<&str> = sentences.iter().map(|s| s.original.as_str()).collect();
        let selected = SummarySelector::new(cfg.size_summary).select(&originals, &rank.scores);
        observer.on_stage_end(STAGE_SELECT, &StageReport::new(clock.elapsed()));

        Ok(Summary {
            sentences: selected,
            iterations: rank.iterations,
            converged: rank.converged,
        })
    }

    /// Summarize one document without observation.
    pub fn summarize<L>(&self, sentences: &[Sentence], lookup: &L) -> Result<Summary, ConfigError>
    where
        L: EmbeddingLookup + Sync + ?Sized,
    {
        self.run(sentences.to_vec(), lookup, &mut NoopObserver)
    }

    /// Summarize independent documents in parallel, preserving input order.
    pub fn summarize_batch<L>(
        &self,
        documents: &[Vec<Sentence>],
        lookup: &L,
    ) -> Result<Vec<Summary>, ConfigError>
    where
        L: EmbeddingLookup + Sync + ?Sized,
        Pre: Sync,
        Rnk: Sync,
    {
        self.check_lookup(lookup)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(documents = documents.len(), "summarizing batch");

        documents
            .par_iter()
            .map(|doc| self.summarize(doc, lookup))
            .collect()
    }

    fn check_lookup<L>(&self, lookup: &L) -> Result<(), ConfigError>
    where
        L: EmbeddingLookup + ?Sized,
    {
        match lookup.dimension() {
            Some(dim) if dim != self.config.embedding_dimension => Err(ConfigError::new(
                ErrorCode::DimensionMismatch,
                "/embedding_dimension",
                format!(
                    "embedding lookup has dimension {dim}, config expects {}",
                    self.config.embedding_dimension
                ),
            )
            .with_hint("Set embedding_dimension to the vector size of the embedding table")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingTable;
    use crate::nlp::cleaner::BasicCleaner;
    use crate::pipeline::observer::{StageTimingObserver, STAGES};
    use std::collections::HashMap;

    fn toy_table() -> EmbeddingTable {
        vec![
            ("cat", vec![1.0, 0.0, 0.0]),
            ("dog", vec![0.9, 0.1, 0.0]),
            ("sat", vec![0.8, 0.2, 0.0]),
            ("stocks", vec![0.0, 0.0, 1.0]),
            ("fell", vec![0.0, 0.1, 0.9]),
            ("sharply", vec![0.1, 0.0, 1.0]),
        ]
        .into_iter()
        .collect()
    }

    fn cat_dog_stocks() -> Vec<Sentence> {
        vec![
            Sentence::new("The cat sat.", "the cat sat"),
            Sentence::new("The dog sat.", "the dog sat"),
            Sentence::new("Stocks fell sharply.", "stocks fell sharply"),
        ]
    }

    fn summarizer(size: usize) -> Summarizer {
        Summarizer::new(SummaryConfig::new(3, size)).unwrap()
    }

    #[test]
    fn test_dense_cluster_wins() {
        let summary = summarizer(1)
            .summarize(&cat_dog_stocks(), &toy_table())
            .unwrap();

        assert_eq!(summary.len(), 1);
        let top = &summary.texts()[0];
        assert!(
            *top == "The cat sat." || *top == "The dog sat.",
            "unexpected top sentence: {top}"
        );
        assert!(summary.converged);
    }

    #[test]
    fn test_outlier_ranked_last() {
        let summary = summarizer(3)
            .summarize(&cat_dog_stocks(), &toy_table())
            .unwrap();

        assert_eq!(summary.sentences[2].index, 2);
        assert!(summary.sentences[1].score > summary.sentences[2].score);
    }

    #[test]
    fn test_hub_sentence_first() {
        let table: EmbeddingTable = vec![("alpha", vec![1.0, 0.0]), ("beta", vec![0.0, 1.0])]
            .into_iter()
            .collect();
        let sentences = vec![
            Sentence::verbatim("alpha"),
            Sentence::verbatim("alpha beta"),
            Sentence::verbatim("beta"),
        ];

        let summary = Summarizer::new(SummaryConfig::new(2, 3))
            .unwrap()
            .summarize(&sentences, &table)
            .unwrap();

        assert_eq!(summary.sentences[0].text, "alpha beta");
        assert_eq!(summary.sentences[0].index, 1);
    }

    #[test]
    fn test_all_oov_falls_back_to_document_order() {
        let table = EmbeddingTable::new(3);
        let sentences = vec![
            Sentence::verbatim("first comment"),
            Sentence::verbatim("second comment"),
            Sentence::verbatim("third comment"),
            Sentence::verbatim("fourth comment"),
        ];

        let summary = summarizer(4).summarize(&sentences, &table).unwrap();

        assert_eq!(
            summary.texts(),
            vec!["first comment", "second comment", "third comment", "fourth comment"]
        );
        let first = summary.sentences[0].score;
        assert!(summary.sentences.iter().all(|s| s.score == first));
    }

    #[test]
    fn test_scores_sum_to_one_after_convergence() {
        let mut observer = RankCapture::default();
        let sentences = cat_dog_stocks();
        summarizer(3)
            .run(sentences, &toy_table(), &mut observer)
            .unwrap();

        let rank = observer.rank.unwrap();
        assert!(rank.converged);
        assert!((rank.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_run_still_ranks() {
        // With a cap of one iteration and a zero threshold the ranker never
        // converges; the scores are best effort and only their order is used.
        let cfg = SummaryConfig::new(3, 3).with_max_iterations(1).with_threshold(0.0);
        let summary = Summarizer::new(cfg)
            .unwrap()
            .summarize(&cat_dog_stocks(), &toy_table())
            .unwrap();

        assert!(!summary.converged);
        assert_eq!(summary.iterations, 1);
        assert_eq!(summary.len(), 3);
    }

    #[test]
    fn test_idempotent() {
        let s = summarizer(2);
        let first = s.summarize(&cat_dog_stocks(), &toy_table()).unwrap();
        let second = s.summarize(&cat_dog_stocks(), &toy_table()).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.sentences.iter().zip(&second.sentences) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn test_empty_input() {
        let summary = summarizer(3).summarize(&[], &toy_table()).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_single_sentence() {
        let sentences = vec![Sentence::verbatim("the cat sat")];
        let summary = summarizer(1).summarize(&sentences, &toy_table()).unwrap();

        assert_eq!(summary.texts(), vec!["the cat sat"]);
        assert_eq!(summary.sentences[0].score, 1.0);
    }

    #[test]
    fn test_zero_size_summary() {
        let summary = summarizer(0)
            .summarize(&cat_dog_stocks(), &toy_table())
            .unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = Summarizer::new(SummaryConfig::new(3, 1).with_damping(1.2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Summarizer::new(SummaryConfig::new(300, 1))
            .unwrap()
            .summarize(&cat_dog_stocks(), &toy_table())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DimensionMismatch);
    }

    #[test]
    fn test_plain_hashmap_lookup() {
        let mut map: HashMap<String, Vec<f64>> = HashMap::new();
        map.insert("cat".into(), vec![1.0, 0.0, 0.0]);
        map.insert("dog".into(), vec![0.9, 0.1, 0.0]);

        let summary = summarizer(2).summarize(&cat_dog_stocks(), &map).unwrap();
        assert_eq!(summary.len(), 2);
        assert!(summary.sentences.iter().all(|s| s.index != 2));
    }

    #[test]
    fn test_hashmap_with_stray_vector_is_deterministic() {
        let sentences = vec![
            Sentence::verbatim("cat sat"),
            Sentence::verbatim("dog sat"),
            Sentence::verbatim("stray stocks"),
        ];
        let s = summarizer(3);

        let mut previous: Option<Summary> = None;
        for _ in 0..50 {
            let mut map: HashMap<String, Vec<f64>> = HashMap::new();
            map.insert("cat".into(), vec![1.0, 0.0, 0.0]);
            map.insert("dog".into(), vec![0.9, 0.1, 0.0]);
            map.insert("stray".into(), vec![1.0, 0.0]);

            let summary = s.summarize(&sentences, &map).unwrap();
            // The stray word is a miss, so the last sentence has no vector
            assert_eq!(summary.sentences[2].index, 2);
            if let Some(prev) = &previous {
                assert_eq!(prev, &summary);
            }
            previous = Some(summary);
        }
    }

    #[test]
    fn test_with_basic_cleaner() {
        // Only the original text is provided; the cleaner derives the rest
        let sentences = vec![
            Sentence::verbatim("The CAT sat!"),
            Sentence::verbatim("The dog, sat."),
            Sentence::verbatim("Stocks fell... sharply"),
        ];

        let summary = summarizer(1)
            .with_preprocessor(BasicCleaner::new())
            .summarize(&sentences, &toy_table())
            .unwrap();

        assert_ne!(summary.sentences[0].index, 2);
        assert!(summary.texts()[0].starts_with("The "));
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let mut observer = StageTimingObserver::new();
        summarizer(2)
            .run(cat_dog_stocks(), &toy_table(), &mut observer)
            .unwrap();

        let names: Vec<_> = observer.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, STAGES.to_vec());

        let rank = observer.report(STAGE_RANK).unwrap();
        assert_eq!(rank.nodes, Some(3));
        assert_eq!(rank.converged, Some(true));
        assert!(rank.iterations.unwrap() > 0);
    }

    #[test]
    fn test_batch_matches_single() {
        let s = summarizer(2);
        let docs = vec![
            cat_dog_stocks(),
            Vec::new(),
            vec![Sentence::verbatim("dog"), Sentence::verbatim("stocks")],
        ];

        let batch = s.summarize_batch(&docs, &toy_table()).unwrap();

        assert_eq!(batch.len(), 3);
        for (doc, summary) in docs.iter().zip(&batch) {
            assert_eq!(summary, &s.summarize(doc, &toy_table()).unwrap());
        }
    }

    #[test]
    fn test_custom_ranker() {
        /// Ranks later sentences higher.
        struct Recency;

        impl Ranker for Recency {
            fn rank(
                &self,
                matrix: &crate::graph::similarity::SimilarityMatrix,
                _cfg: &SummaryConfig,
            ) -> crate::pagerank::PageRankResult {
                let scores = (0..matrix.len()).map(|i| i as f64).collect();
                crate::pagerank::PageRankResult::new(scores, 0, 0.0, true)
            }
        }

        let summary = summarizer(1)
            .with_ranker(Recency)
            .summarize(&cat_dog_stocks(), &toy_table())
            .unwrap();
        assert_eq!(summary.sentences[0].index, 2);
    }

    #[derive(Default)]
    struct RankCapture {
        rank: Option<crate::pagerank::PageRankResult>,
    }

    impl PipelineObserver for RankCapture {
        fn on_rank(&mut self, rank: &crate::pagerank::PageRankResult) {
            self.rank = Some(rank.clone());
        }
    }
}
