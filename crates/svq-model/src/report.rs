//! Frequency tables and per-unit scoring results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::CellValue;

/// Observed response counts for one (aggregation unit, column) pair.
///
/// Keys are exactly the permissible category set for the column, zero counts
/// included, so the key set is identical across all units of a column.
pub type FrequencyTable = BTreeMap<CellValue, u64>;

/// A real-valued distribution over the same category keys (expected counts,
/// normalized proportions).
pub type RealTable = BTreeMap<CellValue, f64>;

/// Frequency tables for one column, keyed by aggregation unit.
///
/// Invariant: every table shares the same category key set. The scoring
/// models align distributions by key and check this where they compare
/// tables directly.
pub type FrequenciesByUnit = BTreeMap<CellValue, FrequencyTable>;

/// Raw per-unit column subsets: unit -> column -> the values that unit
/// contributed (null-filtered cells excluded).
pub type UnitData = BTreeMap<CellValue, BTreeMap<String, Vec<CellValue>>>;

/// Scoring result for one (aggregation unit, column) pair.
#[derive(Debug, Clone, Serialize)]
pub struct OutlierRecord {
    /// Outlier score; higher means more anomalous. MMA and SVA scores live
    /// on different scales and are not comparable to each other.
    pub score: f64,
    /// The unit's observed frequency table.
    pub observed_freq: FrequencyTable,
    /// The reference distribution the unit was judged against: peer counts
    /// for MMA, the unit's own normalized proportions for SVA.
    pub expected_freq: RealTable,
    /// Chi-square p-value (MMA only; SVA records carry no p-value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
}

/// Full output of one aggregation-driver run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlierReport {
    /// unit -> column -> scoring record.
    pub records: BTreeMap<CellValue, BTreeMap<String, OutlierRecord>>,
    /// The raw data subsets behind each record, for caller introspection.
    pub unit_data: UnitData,
}

impl OutlierReport {
    /// Score for one (unit, column) pair, if present.
    pub fn score(&self, unit: &CellValue, column: &str) -> Option<f64> {
        self.records
            .get(unit)
            .and_then(|columns| columns.get(column))
            .map(|record| record.score)
    }

    /// Record for one (unit, column) pair, if present.
    pub fn record(&self, unit: &CellValue, column: &str) -> Option<&OutlierRecord> {
        self.records.get(unit).and_then(|columns| columns.get(column))
    }

    /// Aggregation units present in the report, in deterministic order.
    pub fn units(&self) -> impl Iterator<Item = &CellValue> {
        self.records.keys()
    }
}
