//! Model-agnostic aggregation driver.

use polars::prelude::DataFrame;
use tracing::{debug, trace};

use svq_common::column_cells;
use svq_model::{CellValue, FrequenciesByUnit, OutlierRecord, OutlierReport};

use crate::error::Result;
use crate::frequency::{build_frequencies, distinct_values, partition_by_unit};
use crate::model::ScoringModel;

/// Runs `model` over every categorical column and assembles the report.
///
/// The dataset is partitioned by aggregation unit once, up front, and the
/// partition is reused for every column. The model is invoked once per
/// column with the frequencies of all units. Any model error aborts the
/// whole call; no partial report is returned.
pub fn run_with_model(
    df: &DataFrame,
    unit_column: &str,
    categorical_columns: &[&str],
    null_responses: &[CellValue],
    model: &dyn ScoringModel,
) -> Result<OutlierReport> {
    let unit_cells = column_cells(df.column(unit_column)?);
    let partition = partition_by_unit(&unit_cells);
    debug!(
        model = model.name(),
        unit_column,
        units = partition.len(),
        columns = categorical_columns.len(),
        "scoring dataset"
    );

    let mut report = OutlierReport::default();
    for &column in categorical_columns {
        let cells = column_cells(df.column(column)?);
        let mut categories = distinct_values(&cells);
        for null in null_responses {
            categories.remove(null);
        }
        trace!(
            column,
            categories = categories.len(),
            "building frequency tables"
        );

        let mut frequencies = FrequenciesByUnit::new();
        for (unit, rows) in &partition {
            frequencies.insert(unit.clone(), build_frequencies(&cells, &categories, rows));
            let observed: Vec<CellValue> =
                rows.iter().filter_map(|&row| cells[row].clone()).collect();
            report
                .unit_data
                .entry(unit.clone())
                .or_default()
                .insert(column.to_string(), observed);
        }

        let output = model.compute_outlier_scores(&frequencies)?;
        for (unit, observed_freq) in frequencies {
            let record = OutlierRecord {
                score: output.scores.get(&unit).copied().unwrap_or(0.0),
                observed_freq,
                expected_freq: output.expected.get(&unit).cloned().unwrap_or_default(),
                p_value: output.p_values.get(&unit).copied().flatten(),
            };
            report
                .records
                .entry(unit)
                .or_default()
                .insert(column.to_string(), record);
        }
    }
    Ok(report)
}
