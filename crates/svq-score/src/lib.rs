//! Outlier scoring for categorical survey data.
//!
//! Scores each aggregation unit (e.g. an interviewer) in a tabular dataset
//! by how far its distribution of categorical answers deviates from the
//! pooled distribution of its peers. Two interchangeable models implement
//! the [`ScoringModel`] trait:
//!
//! - [`MultinomialModel`] (MMA): chi-square test of each unit against its
//!   peers' pooled distribution. Needs the `mma` cargo feature (on by
//!   default), which brings in the chi-square distribution; check
//!   [`mma_available`] when the feature set is not known at the call site.
//! - [`SValueModel`] (SVA): median-deviation score, free of distributional
//!   assumptions.
//!
//! ```no_run
//! use polars::df;
//! use svq_score::run_sva;
//!
//! let data = df!(
//!     "interviewer" => ["a", "a", "b", "b"],
//!     "cough"       => ["y", "n", "y", "y"],
//! )?;
//! let report = run_sva(&data, "interviewer", &["cough"], &[])?;
//! for unit in report.units() {
//!     println!("{unit}: {:?}", report.score(unit, "cough"));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod driver;
pub mod error;
pub mod frequency;
pub mod model;
pub mod normalize;

pub use driver::run_with_model;
pub use error::{Result, ScoreError};
#[cfg(feature = "mma")]
pub use model::MultinomialModel;
pub use model::{ModelOutput, SValueModel, ScoringModel};
pub use svq_model::{
    CellValue, FrequenciesByUnit, FrequencyTable, OutlierRecord, OutlierReport, RealTable,
};

/// Tolerance for float-total comparisons between tables that must agree.
pub(crate) const FLOAT_EQ_DELTA: f64 = 1e-6;

/// True when this build includes the Multinomial Model Algorithm.
///
/// MMA needs the chi-square distribution from the optional statistics
/// dependency. Without the `mma` feature [`run_mma`] does not exist, so
/// callers that choose a model at runtime should consult this flag rather
/// than probing for the symbol.
pub const fn mma_available() -> bool {
    cfg!(feature = "mma")
}

/// Runs the Multinomial Model Algorithm over `categorical_columns`.
///
/// `unit_column` names the aggregation-unit column; `null_responses` are
/// dropped from every column's category set before counting (useful for
/// skip markers like `"-"`).
#[cfg(feature = "mma")]
pub fn run_mma(
    df: &polars::prelude::DataFrame,
    unit_column: &str,
    categorical_columns: &[&str],
    null_responses: &[CellValue],
) -> Result<OutlierReport> {
    run_with_model(
        df,
        unit_column,
        categorical_columns,
        null_responses,
        &MultinomialModel::new(),
    )
}

/// Runs the S-Value Algorithm over `categorical_columns`.
///
/// Same surface as [`run_mma`], available in every build.
pub fn run_sva(
    df: &polars::prelude::DataFrame,
    unit_column: &str,
    categorical_columns: &[&str],
    null_responses: &[CellValue],
) -> Result<OutlierReport> {
    run_with_model(
        df,
        unit_column,
        categorical_columns,
        null_responses,
        &SValueModel::new(),
    )
}
