//! Count normalization and median utilities shared by the scoring models.

use svq_model::{FrequencyTable, RealTable};

/// Rescales a counts table so its values sum to `target`.
///
/// Callers guarantee a positive input total; every supported code path
/// checks totals before normalizing, so the zero-sum case is never reached.
pub fn normalize_counts(counts: &RealTable, target: f64) -> RealTable {
    let total: f64 = counts.values().sum();
    counts
        .iter()
        .map(|(category, count)| (category.clone(), target * count / total))
        .collect()
}

/// Widens an integer frequency table to real values.
pub fn counts_to_real(table: &FrequencyTable) -> RealTable {
    table
        .iter()
        .map(|(category, count)| (category.clone(), *count as f64))
        .collect()
}

/// Median with midpoint interpolation on even-length input.
///
/// Sorts the slice in place. Must not be called on empty input.
pub fn median(values: &mut [f64]) -> f64 {
    debug_assert!(!values.is_empty());
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FLOAT_EQ_DELTA;
    use svq_model::CellValue;

    fn table(counts: &[(&str, u64)]) -> FrequencyTable {
        counts
            .iter()
            .map(|(k, v)| (CellValue::from(*k), *v))
            .collect()
    }

    #[test]
    fn proportions_sum_to_one() {
        let counts = counts_to_real(&table(&[("y", 3), ("n", 1), ("-", 4)]));
        let normalized = normalize_counts(&counts, 1.0);
        let total: f64 = normalized.values().sum();
        assert!((total - 1.0).abs() < FLOAT_EQ_DELTA);
        assert!((normalized[&CellValue::from("y")] - 0.375).abs() < FLOAT_EQ_DELTA);
    }

    #[test]
    fn rescales_to_arbitrary_target() {
        let counts = counts_to_real(&table(&[("y", 2), ("n", 6)]));
        let rescaled = normalize_counts(&counts, 46.0);
        let total: f64 = rescaled.values().sum();
        assert!((total - 46.0).abs() < FLOAT_EQ_DELTA);
        assert!((rescaled[&CellValue::from("y")] - 11.5).abs() < FLOAT_EQ_DELTA);
    }

    #[test]
    fn median_odd_length() {
        assert_eq!(median(&mut [0.5, 0.1, 0.3]), 0.3);
    }

    #[test]
    fn median_even_length_interpolates() {
        assert_eq!(median(&mut [0.4, 0.1, 0.2, 0.3]), 0.25);
    }

    #[test]
    fn median_single_value() {
        assert_eq!(median(&mut [0.7]), 0.7);
    }
}
