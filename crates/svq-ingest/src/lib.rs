//! Survey data ingestion.
//!
//! Loads survey CSV files into Polars `DataFrame`s for the scoring engine.
//! The engine itself is format-agnostic; anything that produces a
//! `DataFrame` with an aggregation-unit column and categorical columns can
//! feed it.

mod error;

pub use error::{IngestError, Result};

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

/// Reads a survey CSV file into a `DataFrame`.
///
/// The first row is the header; column dtypes are inferred. Fails with
/// [`IngestError::FileNotFound`] for a missing file and
/// [`IngestError::EmptyCsv`] for a file with no data rows.
pub fn read_survey_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|err| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
        .finish()
        .map_err(|err| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    debug!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "read survey CSV"
    );
    Ok(df)
}
