//! Validation engine for summary specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummarySpec`](super::spec::SummarySpec) and collects every diagnostic
//! into a [`ValidationReport`]. It never short-circuits on the first error,
//! so callers see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use comment_summarizer::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::ConfigError;
use super::spec::{SummarySpec, SPEC_VERSION};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding attached to a [`ConfigError`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Collapse the report into the first error, if any.
    pub fn into_result(self) -> Result<(), ConfigError> {
        match self
            .diagnostics
            .into_iter()
            .find(|d| d.severity == Severity::Error)
        {
            Some(diag) => Err(diag.error),
            None => Ok(()),
        }
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`SummarySpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so a single engine can be
/// shared across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_factor"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`SummarySpec`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(EmbeddingDimensionRule));
        engine.add_rule(Box::new(DampingFactorRule));
        engine.add_rule(Box::new(ConvergenceRule));
        engine.add_rule(Box::new(SummarySizeRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &SummarySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version ────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported spec version {}", spec.v),
            )
            .with_hint(format!("Set \"v\" to {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Embedding dimension ─────────────────────────────────────────────────

struct EmbeddingDimensionRule;

impl ValidationRule for EmbeddingDimensionRule {
    fn name(&self) -> &str {
        "embedding_dimension"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        match spec.embedding_dimension {
            d if d < 0 => vec![ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/embedding_dimension",
                    format!("embedding_dimension must not be negative, got {d}"),
                )
                .with_hint("Use the vector size of the embedding table (commonly 100-300)"),
            )],
            0 => vec![ValidationDiagnostic::warning(ConfigError::new(
                ErrorCode::OutOfRange,
                "/embedding_dimension",
                "embedding_dimension is 0; every sentence will vectorize to the empty vector",
            ))],
            _ => vec![],
        }
    }
}

// ─── 3. Damping factor in (0, 1) ────────────────────────────────────────────

struct DampingFactorRule;

impl ValidationRule for DampingFactorRule {
    fn name(&self) -> &str {
        "damping_factor"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let d = spec.damping_factor;
        if !d.is_finite() {
            return vec![ValidationDiagnostic::error(ConfigError::new(
                ErrorCode::NotFinite,
                "/damping_factor",
                "damping_factor must be a finite number",
            ))];
        }
        if d <= 0.0 || d >= 1.0 {
            return vec![ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/damping_factor",
                    format!("damping_factor must be in (0, 1), got {d}"),
                )
                .with_hint("The standard PageRank value is 0.85"),
            )];
        }
        vec![]
    }
}

// ─── 4. Convergence threshold and iteration cap ─────────────────────────────

struct ConvergenceRule;

impl ValidationRule for ConvergenceRule {
    fn name(&self) -> &str {
        "convergence"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let t = spec.convergence_threshold;
        if !t.is_finite() {
            out.push(ValidationDiagnostic::error(ConfigError::new(
                ErrorCode::NotFinite,
                "/convergence_threshold",
                "convergence_threshold must be a finite number",
            )));
        } else if t < 0.0 {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/convergence_threshold",
                    format!("convergence_threshold must not be negative, got {t}"),
                )
                .with_hint("Use 0 to always run until max_iterations"),
            ));
        }

        match spec.max_iterations {
            m if m < 0 => out.push(ValidationDiagnostic::error(ConfigError::new(
                ErrorCode::OutOfRange,
                "/max_iterations",
                format!("max_iterations must not be negative, got {m}"),
            ))),
            0 => out.push(ValidationDiagnostic::warning(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/max_iterations",
                    "max_iterations is 0; every sentence will keep the uniform initial score",
                )
                .with_hint("The standard PageRank cap is 100"),
            )),
            _ => {}
        }

        out
    }
}

// ─── 5. Summary size ────────────────────────────────────────────────────────

struct SummarySizeRule;

impl ValidationRule for SummarySizeRule {
    fn name(&self) -> &str {
        "size_summary"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.size_summary < 0 {
            vec![ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/size_summary",
                    format!("size_summary must not be negative, got {}", spec.size_summary),
                )
                .with_hint("Use 0 for an empty summary"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = spec.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let diag_fn = if spec.strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
