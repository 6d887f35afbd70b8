//! Stable error codes for configuration diagnostics.
//!
//! Codes serialize as snake_case strings and are safe to match on from
//! callers that consume diagnostics as JSON.

use serde::Serialize;

/// Machine-readable category of a configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A numeric parameter is outside its permitted range.
    OutOfRange,
    /// A numeric parameter is NaN or infinite.
    NotFinite,
    /// Embedding vectors do not match the configured dimension.
    DimensionMismatch,
    /// The spec version is not understood by this crate.
    UnsupportedVersion,
    /// A field was not recognized by the schema.
    UnknownField,
    /// The spec document could not be parsed.
    InvalidSpec,
}

impl ErrorCode {
    /// Returns the snake_case name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRange => "out_of_range",
            Self::NotFinite => "not_finite",
            Self::DimensionMismatch => "dimension_mismatch",
            Self::UnsupportedVersion => "unsupported_version",
            Self::UnknownField => "unknown_field",
            Self::InvalidSpec => "invalid_spec",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
