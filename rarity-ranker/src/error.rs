//! Error types for rarity-ranker
//!
//! Per-item fetch failures are not errors at this level: they are isolated
//! per item (see `services::item_source::FetchError`) and reported in the
//! load summary.

use crate::collection::Phase;
use thiserror::Error;

/// Ranker error type
#[derive(Debug, Error)]
pub enum RankerError {
    /// Operation invoked in the wrong pipeline phase
    #[error("Pipeline phase error: expected {expected}, collection is {actual}")]
    Phase { expected: Phase, actual: Phase },

    /// Top-K requested from a collection with fewer than K scored items
    #[error("Insufficient collection size: requested top {requested}, only {available} items scored")]
    InsufficientItems { requested: usize, available: usize },

    /// Invalid request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Scoring task panicked or was cancelled
    #[error("Scoring task failed: {0}")]
    ScoringTask(String),

    /// Report serialization failed
    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for ranker operations
pub type Result<T> = std::result::Result<T, RankerError>;
