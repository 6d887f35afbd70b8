//! Summary selection
//!
//! Turns ranker scores into an ordered list of original sentences.

pub mod selector;
