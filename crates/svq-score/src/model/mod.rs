//! Scoring models.
//!
//! Each model turns one column's frequencies-by-unit into per-unit outlier
//! scores. The two algorithms share this interface and nothing else; their
//! score scales are not comparable to each other.

#[cfg(feature = "mma")]
mod multinomial;
mod svalue;

#[cfg(feature = "mma")]
pub use multinomial::MultinomialModel;
pub use svalue::SValueModel;

use std::collections::BTreeMap;

use svq_model::{CellValue, FrequenciesByUnit, RealTable};

use crate::error::Result;

/// Per-unit output of a scoring model for one column.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    /// unit -> outlier score (non-negative; higher = more anomalous).
    pub scores: BTreeMap<CellValue, f64>,
    /// unit -> reference distribution the unit was judged against.
    pub expected: BTreeMap<CellValue, RealTable>,
    /// unit -> p-value; `None` for models without a distributional test.
    pub p_values: BTreeMap<CellValue, Option<f64>>,
}

/// A scoring algorithm over per-unit frequency tables.
///
/// Implementations are pure functions of their input: identical frequencies
/// produce identical output, and nothing is retained across calls.
pub trait ScoringModel {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Computes outlier scores for one column.
    ///
    /// `frequencies` maps each aggregation unit to its frequency table; all
    /// tables share one category key set (see [`FrequenciesByUnit`]). Fails
    /// with [`crate::ScoreError::InsufficientUnits`] when fewer than 2 units
    /// are present.
    fn compute_outlier_scores(&self, frequencies: &FrequenciesByUnit) -> Result<ModelOutput>;
}
