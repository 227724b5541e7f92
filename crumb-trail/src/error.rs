//! Trail error types.

use std::path::PathBuf;

/// Error types for trail operations.
#[derive(Debug, thiserror::Error)]
pub enum TrailError {
    /// A record's links or digest do not match
    #[error("Chain integrity broken at record {index}: {reason}")]
    ChainIntegrity { index: usize, reason: String },

    /// Trail file could not be read or written
    #[error("Persistence error at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be encoded
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Lock was not acquired in time
    #[error("Trail busy: lock not acquired within {waited_ms}ms")]
    ConcurrencyConflict { waited_ms: u64 },
}

impl TrailError {
    /// Whether the caller may retry the same operation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::ConcurrencyConflict { .. }
        )
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

/// Result type for trail operations.
pub type Result<T> = std::result::Result<T, TrailError>;
