//! Shared error and result types.

use crumb_trail::TrailError;
use lexicon::LexiconError;

/// Error types for the detector.
///
/// Detection itself never fails; text that matches nothing scores zero.
#[derive(Debug, thiserror::Error)]
pub enum SkeletonError {
    /// A shared structure's lock was not acquired in time
    #[error("{resource} busy: lock not acquired within {waited_ms}ms")]
    ConcurrencyConflict {
        resource: &'static str,
        waited_ms: u64,
    },

    /// Edge rejected by the influence graph
    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    /// Corpus scan stopped by its cancel flag
    #[error("Cancelled after {completed} texts")]
    Cancelled { completed: usize },

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Lexicon error
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Trail error
    #[error("Trail error: {0}")]
    Trail(#[from] TrailError),
}

impl SkeletonError {
    /// Whether the caller may retry the same operation.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConcurrencyConflict { .. } => true,
            Self::Trail(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for detector operations.
pub type Result<T> = std::result::Result<T, SkeletonError>;
