//! Polars `AnyValue` conversion functions.
//!
//! The scoring engine works on typed [`CellValue`]s; these helpers are the
//! single place where Polars cell representations are mapped into them.

use polars::prelude::{AnyValue, Column};

use svq_model::CellValue;

/// Converts a Polars `AnyValue` to a [`CellValue`].
///
/// Returns `None` for null-like cells: `Null` itself and non-finite floats
/// (NaN markers). Such cells never become categories, never contribute to
/// counts, and never define aggregation units.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use svq_common::any_to_cell;
/// use svq_model::CellValue;
///
/// assert_eq!(any_to_cell(&AnyValue::Null), None);
/// assert_eq!(any_to_cell(&AnyValue::Int32(42)), Some(CellValue::Int(42)));
/// assert_eq!(
///     any_to_cell(&AnyValue::String("yes")),
///     Some(CellValue::Text("yes".to_string()))
/// );
/// ```
pub fn any_to_cell(value: &AnyValue<'_>) -> Option<CellValue> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(v) => Some(CellValue::Bool(*v)),
        AnyValue::Int8(v) => Some(CellValue::Int(i64::from(*v))),
        AnyValue::Int16(v) => Some(CellValue::Int(i64::from(*v))),
        AnyValue::Int32(v) => Some(CellValue::Int(i64::from(*v))),
        AnyValue::Int64(v) => Some(CellValue::Int(*v)),
        AnyValue::UInt8(v) => Some(CellValue::Int(i64::from(*v))),
        AnyValue::UInt16(v) => Some(CellValue::Int(i64::from(*v))),
        AnyValue::UInt32(v) => Some(CellValue::Int(i64::from(*v))),
        AnyValue::UInt64(v) => i64::try_from(*v).ok().map(CellValue::Int),
        AnyValue::Float32(v) => float_to_cell(f64::from(*v)),
        AnyValue::Float64(v) => float_to_cell(*v),
        AnyValue::String(s) => Some(CellValue::Text((*s).to_string())),
        AnyValue::StringOwned(s) => Some(CellValue::Text(s.to_string())),
        other => Some(CellValue::Text(other.to_string())),
    }
}

fn float_to_cell(value: f64) -> Option<CellValue> {
    if value.is_finite() {
        Some(CellValue::Float(value))
    } else {
        None
    }
}

/// True when the cell carries no usable value.
pub fn is_null_like(value: &AnyValue<'_>) -> bool {
    any_to_cell(value).is_none()
}

/// Extracts every cell of a column as an `Option<CellValue>`, preserving row
/// order. Null-like cells come back as `None`.
pub fn column_cells(column: &Column) -> Vec<Option<CellValue>> {
    (0..column.len())
        .map(|idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            any_to_cell(&value)
        })
        .collect()
}
