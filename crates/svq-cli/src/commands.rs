//! Command implementations.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::info;

use svq_ingest::read_survey_csv;
use svq_model::{CellValue, OutlierReport};

use crate::cli::{ModelArg, OutputArg, ScoreArgs};
use crate::summary::print_report;

pub fn run_score(args: &ScoreArgs) -> Result<()> {
    let data = read_survey_csv(&args.data_file)
        .with_context(|| format!("loading {}", args.data_file.display()))?;
    info!(
        rows = data.height(),
        path = %args.data_file.display(),
        "loaded survey data"
    );

    let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
    let null_responses: Vec<CellValue> = args
        .null_responses
        .iter()
        .map(|value| parse_response_value(value))
        .collect();

    let report = match args.model {
        ModelArg::Sva => {
            svq_score::run_sva(&data, &args.unit_column, &columns, &null_responses)?
        }
        ModelArg::Mma => run_mma(&data, &args.unit_column, &columns, &null_responses)?,
    };

    match args.output {
        OutputArg::Pretty => print_report(&report, args.model == ModelArg::Mma),
        OutputArg::Json => println!("{}", serde_json::to_string_pretty(&report.records)?),
    }
    Ok(())
}

#[cfg(feature = "mma")]
fn run_mma(
    data: &DataFrame,
    unit_column: &str,
    columns: &[&str],
    null_responses: &[CellValue],
) -> Result<OutlierReport> {
    Ok(svq_score::run_mma(data, unit_column, columns, null_responses)?)
}

#[cfg(not(feature = "mma"))]
fn run_mma(
    _data: &DataFrame,
    _unit_column: &str,
    _columns: &[&str],
    _null_responses: &[CellValue],
) -> Result<OutlierReport> {
    anyhow::bail!(
        "this build does not include the MMA model; rebuild with the `mma` feature or use --model sva"
    )
}

pub fn run_models() {
    println!("sva  S-Value Algorithm (median deviation)      available");
    let mma_state = if svq_score::mma_available() {
        "available"
    } else {
        "not built (enable the `mma` feature)"
    };
    println!("mma  Multinomial Model Algorithm (chi-square)  {mma_state}");
}

/// Interprets a CLI null-response string the way CSV type inference would:
/// integers and floats become numeric values, everything else stays text.
fn parse_response_value(value: &str) -> CellValue {
    if let Ok(int) = value.parse::<i64>() {
        return CellValue::Int(int);
    }
    if let Ok(float) = value.parse::<f64>() {
        return CellValue::Float(float);
    }
    CellValue::Text(value.to_string())
}
