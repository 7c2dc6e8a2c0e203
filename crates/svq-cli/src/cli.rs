//! CLI argument definitions for the survey outlier scorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "svq",
    version,
    about = "Survey QC outlier scoring - flag anomalous answer patterns",
    long_about = "Score aggregation units (e.g. interviewers) in structured survey data\n\
                  by how far their categorical answer distributions deviate from their\n\
                  peers'. Supports the chi-square Multinomial Model Algorithm (MMA) and\n\
                  the median-deviation S-Value Algorithm (SVA)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score every aggregation unit in a survey CSV.
    Score(ScoreArgs),

    /// List the scoring models and whether this build includes them.
    Models,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Path to the survey data CSV.
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Column identifying the aggregation unit (e.g. the interviewer id).
    #[arg(long = "unit-column", value_name = "COLUMN")]
    pub unit_column: String,

    /// Comma-separated categorical columns to score.
    #[arg(
        long = "columns",
        value_name = "COLUMNS",
        value_delimiter = ',',
        required = true
    )]
    pub columns: Vec<String>,

    /// Response value treated as "not answered" (repeatable). Interpreted
    /// as an integer or float when it parses as one, matching CSV type
    /// inference.
    #[arg(long = "null-response", value_name = "VALUE")]
    pub null_responses: Vec<String>,

    /// Scoring model to run.
    #[arg(long = "model", value_enum, default_value = "sva")]
    pub model: ModelArg,

    /// Output format for the report.
    #[arg(long = "output", value_enum, default_value = "pretty")]
    pub output: OutputArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    /// S-Value Algorithm (median deviation, model-free).
    Sva,
    /// Multinomial Model Algorithm (chi-square against peers).
    Mma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_args_parse() {
        let cli = Cli::try_parse_from([
            "svq",
            "score",
            "survey.csv",
            "--unit-column",
            "interviewer_id",
            "--columns",
            "cough,fever",
            "--null-response",
            "-",
            "--model",
            "mma",
        ])
        .expect("parse score invocation");
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.unit_column, "interviewer_id");
                assert_eq!(args.columns, vec!["cough", "fever"]);
                assert_eq!(args.null_responses, vec!["-"]);
                assert_eq!(args.model, ModelArg::Mma);
            }
            Command::Models => panic!("expected score command"),
        }
    }
}
