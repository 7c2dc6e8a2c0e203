//! Per-unit frequency table construction.

use std::collections::{BTreeMap, BTreeSet};

use svq_model::{CellValue, FrequencyTable};

/// Row indices grouped by aggregation unit, in deterministic unit order.
pub type UnitPartition = BTreeMap<CellValue, Vec<usize>>;

/// Groups row indices by the unit value of each row.
///
/// Computed once per driver run and reused for every column. Rows whose
/// unit cell is null-like belong to no unit.
pub fn partition_by_unit(unit_cells: &[Option<CellValue>]) -> UnitPartition {
    let mut partition = UnitPartition::new();
    for (idx, cell) in unit_cells.iter().enumerate() {
        if let Some(unit) = cell {
            partition.entry(unit.clone()).or_default().push(idx);
        }
    }
    partition
}

/// Distinct non-null values of a column, in type-then-value order.
pub fn distinct_values(cells: &[Option<CellValue>]) -> BTreeSet<CellValue> {
    cells.iter().flatten().cloned().collect()
}

/// Counts how often `unit_rows` take each permissible category value.
///
/// Every category starts at zero, so the key set is identical across units
/// regardless of which values a unit actually reported. Values outside the
/// permissible set (filtered as null responses) are skipped. A unit with no
/// matching rows yields the all-zero table.
pub fn build_frequencies(
    column_cells: &[Option<CellValue>],
    categories: &BTreeSet<CellValue>,
    unit_rows: &[usize],
) -> FrequencyTable {
    let mut frequencies: FrequencyTable =
        categories.iter().map(|category| (category.clone(), 0)).collect();
    for &row in unit_rows {
        if let Some(value) = column_cells.get(row).and_then(|cell| cell.as_ref())
            && let Some(count) = frequencies.get_mut(value)
        {
            *count += 1;
        }
    }
    frequencies
}
