//! Error types for the scoring engine.

use thiserror::Error;

/// Errors raised by the scoring models and the aggregation driver.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Fewer than 2 aggregation units: there is no peer group to compare
    /// against and the computation is undefined.
    #[error("at least 2 aggregation units are required, found {found}")]
    InsufficientUnits { found: usize },

    /// Two frequency tables that must align do not: their category ranges
    /// differ, or their totals disagree beyond the float tolerance. This is
    /// an invariant violation, not a recoverable condition.
    #[error("frequency range mismatch: {0}")]
    RangeMismatch(String),

    /// Named column absent from the input data.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Other DataFrame-level failure.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ScoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        match err {
            polars::prelude::PolarsError::ColumnNotFound(name) => Self::ColumnNotFound {
                column: name.to_string(),
            },
            other => Self::DataFrame {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoreError>;
