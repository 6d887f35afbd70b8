//! Summary specification documents.
//!
//! A [`SummarySpec`] is the loosely-typed form of a [`SummaryConfig`], as it
//! arrives from JSON or another caller. Integer fields are signed so that
//! misuse (a negative summary size, say) reaches the
//! [`super::validation::ValidationEngine`] and is reported with a path and a
//! hint instead of failing inside the deserializer.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "embedding_dimension": 300,
//!   "damping_factor": 0.85,
//!   "convergence_threshold": 0.0001,
//!   "max_iterations": 100,
//!   "size_summary": 5,
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error_code::ErrorCode;
use super::errors::ConfigError;
use super::validation::{ValidationEngine, ValidationReport};
use crate::types::{SummaryConfig, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD};

/// The only spec version understood by this crate.
pub const SPEC_VERSION: u32 = 1;

fn default_version() -> u32 {
    SPEC_VERSION
}

fn default_damping() -> f64 {
    DEFAULT_DAMPING
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_max_iterations() -> i64 {
    DEFAULT_MAX_ITERATIONS as i64
}

/// Top-level summary specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySpec {
    /// Spec version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    /// Dimension of the embedding table.
    pub embedding_dimension: i64,

    #[serde(default = "default_damping")]
    pub damping_factor: f64,

    #[serde(default = "default_threshold")]
    pub convergence_threshold: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: i64,

    /// Number of sentences to return. Required: there is no default.
    pub size_summary: i64,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl SummarySpec {
    /// Parse a spec from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the default validation rules and return every diagnostic.
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self)
    }

    /// Validate and convert into a typed [`SummaryConfig`].
    pub fn into_config(self) -> Result<SummaryConfig, ConfigError> {
        self.validate().into_result()?;

        Ok(SummaryConfig {
            embedding_dimension: to_usize(self.embedding_dimension, "/embedding_dimension")?,
            damping_factor: self.damping_factor,
            convergence_threshold: self.convergence_threshold,
            max_iterations: to_usize(self.max_iterations, "/max_iterations")?,
            size_summary: to_usize(self.size_summary, "/size_summary")?,
        })
    }
}

fn to_usize(value: i64, path: &str) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| {
        ConfigError::new(
            ErrorCode::OutOfRange,
            path,
            format!("{value} does not fit in an unsigned size"),
        )
    })
}

impl From<&SummaryConfig> for SummarySpec {
    fn from(cfg: &SummaryConfig) -> Self {
        let signed = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        Self {
            v: SPEC_VERSION,
            embedding_dimension: signed(cfg.embedding_dimension),
            damping_factor: cfg.damping_factor,
            convergence_threshold: cfg.convergence_threshold,
            max_iterations: signed(cfg.max_iterations),
            size_summary: signed(cfg.size_summary),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let json = r#"{ "embedding_dimension": 300, "size_summary": 5 }"#;
        let spec = SummarySpec::from_json(json).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.damping_factor, 0.85);
        assert_eq!(spec.convergence_threshold, 1e-4);
        assert_eq!(spec.max_iterations, 100);
        assert!(!spec.strict);
    }

    #[test]
    fn test_size_summary_is_required() {
        let err = SummarySpec::from_json(r#"{ "embedding_dimension": 300 }"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSpec);
    }

    #[test]
    fn test_into_config() {
        let json = r#"{
            "v": 1,
            "embedding_dimension": 100,
            "damping_factor": 0.9,
            "max_iterations": 50,
            "size_summary": 3
        }"#;
        let cfg = SummarySpec::from_json(json).unwrap().into_config().unwrap();
        assert_eq!(cfg.embedding_dimension, 100);
        assert_eq!(cfg.damping_factor, 0.9);
        assert_eq!(cfg.max_iterations, 50);
        assert_eq!(cfg.size_summary, 3);
    }

    #[test]
    fn test_negative_size_summary_fails_fast() {
        let json = r#"{ "embedding_dimension": 100, "size_summary": -1 }"#;
        let err = SummarySpec::from_json(json).unwrap().into_config().unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(err.path, "/size_summary");
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{ "embedding_dimension": 100, "size_summary": 3, "window": 4 }"#;
        let spec = SummarySpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("window"));
    }

    #[test]
    fn test_from_config_roundtrip() {
        let cfg = SummaryConfig::new(50, 2).with_damping(0.7);
        let back = SummarySpec::from(&cfg).into_config().unwrap();
        assert_eq!(back, cfg);
    }
}
