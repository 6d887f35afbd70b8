//! Summarization pipeline
//!
//! Configuration parsing and validation, the pluggable stage traits, and the
//! [`runner::Summarizer`] that drives preprocess → vectorize → similarity →
//! rank → select.

pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
