//! Configuration error type.

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;

/// A configuration problem, located by a JSON pointer into the spec.
///
/// Raised only for caller misconfiguration. Data anomalies (unknown words,
/// empty sentences, isolated sentences, non-convergence) never produce one.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("[{code}] {path}: {message}")]
pub struct ConfigError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a suggestion for fixing the problem.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::new(ErrorCode::InvalidSpec, "", err.to_string())
    }
}
