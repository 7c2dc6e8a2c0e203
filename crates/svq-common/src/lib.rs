//! Shared Polars interop helpers for the survey QC crates.

mod polars;

pub use polars::{any_to_cell, column_cells, is_null_like};
