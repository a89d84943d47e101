//! Engine error model.

use thiserror::Error;

/// Result type used across the replenishment engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level error.
///
/// Every variant is deterministic given the same inputs: a failed run fails
/// again when repeated, so callers never retry. Malformed numeric cells are
/// not errors at all; they degrade to a default during normalization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No header matched the keywords and no positional fallback applied.
    #[error("no column found for {keywords:?}; columns found: {headers:?}")]
    ColumnNotFound {
        keywords: Vec<String>,
        headers: Vec<String>,
    },

    /// The dataset is structurally unusable (e.g. it has no columns).
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Engine configuration or run parameters were rejected.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Any other processing failure.
    #[error("processing error: {0}")]
    Processing(String),
}

impl EngineError {
    pub fn column_not_found<K, H>(keywords: K, headers: H) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self::ColumnNotFound {
            keywords: keywords.into_iter().map(Into::into).collect(),
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }
}
