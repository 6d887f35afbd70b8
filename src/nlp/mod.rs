//! Natural Language Processing components
//!
//! This module provides stopword filtering and a basic sentence cleaner for
//! callers that do not bring their own.

pub mod cleaner;
pub mod stopwords;
