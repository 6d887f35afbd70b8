//! Pipeline observer: hooks for timing and debugging a run.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts (vectors, the similarity matrix, raw scores) for debugging, and
//! emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::embedding::vectorizer::SentenceVector;
use crate::graph::similarity::SimilarityMatrix;
use crate::pagerank::PageRankResult;

pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_VECTORIZE: &str = "vectorize";
pub const STAGE_SIMILARITY: &str = "similarity";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";

/// All stages, in execution order.
pub const STAGES: [&str; 5] = [
    STAGE_PREPROCESS,
    STAGE_VECTORIZE,
    STAGE_SIMILARITY,
    STAGE_RANK,
    STAGE_SELECT,
];

/// Wall-clock timer for a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    start: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// What happened during one stage.
///
/// Metrics that do not apply to a stage are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }
}

/// Builder for reports that carry metrics.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Receives callbacks as the pipeline runs. Every method has a no-op default.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_vectors(&mut self, _vectors: &[SentenceVector]) {}

    fn on_similarity(&mut self, _matrix: &SimilarityMatrix) {}

    fn on_rank(&mut self, _rank: &PageRankResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every completed stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed stages in execution order.
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a given stage, if it ran.
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    /// Sum of all stage durations.
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
