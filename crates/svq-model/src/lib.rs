//! Core data model for survey outlier scoring.
//!
//! Defines the categorical scalar type ([`CellValue`]), the frequency-table
//! aliases shared by the scoring models, and the per-unit result records
//! assembled by the aggregation driver.

pub mod cell;
pub mod report;

pub use cell::CellValue;
pub use report::{
    FrequenciesByUnit, FrequencyTable, OutlierRecord, OutlierReport, RealTable, UnitData,
};
