//! Categorical scalar values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// A single categorical value observed in a survey column.
///
/// Values keep their source type, so a column that mixes integer codes and
/// free-text labels still has a deterministic total order: values compare by
/// type name first (`"bool" < "float" < "int" < "text"`), then by value
/// within the type. Frequency tables and unit sets are keyed by this type,
/// which makes their iteration order stable across runs.
///
/// Floats compare and hash by bit pattern. NaN never reaches these
/// collections: null-like cells are filtered out before values are interned
/// (see `svq-common`).
#[derive(Debug, Clone)]
pub enum CellValue {
    Bool(bool),
    Float(f64),
    Int(i64),
    Text(String),
}

impl CellValue {
    /// Name used as the primary sort key when a column mixes types.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Bool(_) => "bool",
            CellValue::Float(_) => "float",
            CellValue::Int(_) => "int",
            CellValue::Text(_) => "text",
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            CellValue::Bool(v) => v.hash(state),
            CellValue::Float(v) => v.to_bits().hash(state),
            CellValue::Int(v) => v.hash(state),
            CellValue::Text(v) => v.hash(state),
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.type_name().cmp(other.type_name()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Float(v) => {
                // Integral floats print without the trailing ".0" so that a
                // float-typed code column renders the same labels as an
                // integer-typed one.
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{v}")
                }
            }
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Emitted as the display string so maps keyed by CellValue serialize
        // as plain JSON objects.
        serializer.collect_str(self)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}
