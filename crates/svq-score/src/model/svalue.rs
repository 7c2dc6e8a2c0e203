//! S-Value Algorithm: median-deviation scoring of normalized distributions.

use std::collections::BTreeMap;

use svq_model::{CellValue, FrequenciesByUnit, RealTable};

use crate::error::{Result, ScoreError};
use crate::model::{ModelOutput, ScoringModel};
use crate::normalize::{counts_to_real, median, normalize_counts};

/// Median-deviation outlier scoring.
///
/// Model-free alternative to the multinomial model: each unit's normalized
/// answer distribution is compared to the per-category median across units,
/// and the resulting L1 distances are rescaled by their own median. No
/// distributional assumption, so no p-values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SValueModel;

impl SValueModel {
    pub fn new() -> Self {
        Self
    }
}

impl ScoringModel for SValueModel {
    fn name(&self) -> &'static str {
        "sva"
    }

    fn compute_outlier_scores(&self, frequencies: &FrequenciesByUnit) -> Result<ModelOutput> {
        if frequencies.len() < 2 {
            return Err(ScoreError::InsufficientUnits {
                found: frequencies.len(),
            });
        }

        // Units with no answers for this column contribute no evidence and
        // cannot be median-compared; they keep a raw score of 0, which still
        // participates in the final rescale below.
        let mut raw_scores: BTreeMap<CellValue, f64> = BTreeMap::new();
        let mut normalized: BTreeMap<CellValue, RealTable> = BTreeMap::new();
        for (unit, table) in frequencies {
            let total: u64 = table.values().sum();
            if total == 0 {
                raw_scores.insert(unit.clone(), 0.0);
                continue;
            }
            normalized.insert(unit.clone(), normalize_counts(&counts_to_real(table), 1.0));
        }

        if !normalized.is_empty() {
            let categories: Vec<CellValue> = frequencies
                .values()
                .next()
                .map(|table| table.keys().cloned().collect())
                .unwrap_or_default();

            let mut medians = RealTable::new();
            for category in &categories {
                let mut proportions: Vec<f64> = normalized
                    .values()
                    .map(|table| table.get(category).copied().unwrap_or(0.0))
                    .collect();
                medians.insert(category.clone(), median(&mut proportions));
            }

            for (unit, table) in &normalized {
                let distance: f64 = categories
                    .iter()
                    .map(|category| {
                        let proportion = table.get(category).copied().unwrap_or(0.0);
                        (proportion - medians[category]).abs()
                    })
                    .sum();
                raw_scores.insert(unit.clone(), distance);
            }
        }

        let scores = rescale_by_median(&raw_scores);
        let expected: BTreeMap<CellValue, RealTable> = frequencies
            .keys()
            .map(|unit| {
                let table = normalized.get(unit).cloned().unwrap_or_default();
                (unit.clone(), table)
            })
            .collect();
        let p_values = frequencies.keys().map(|unit| (unit.clone(), None)).collect();

        Ok(ModelOutput {
            scores,
            expected,
            p_values,
        })
    }
}

/// Divides every raw score by the median raw score.
///
/// When that median is smaller than `1 / n` (n = number of entries), the
/// divisor is `1 / n` instead; a near-zero median would otherwise produce
/// exploding scores for small peer groups.
fn rescale_by_median(raw_scores: &BTreeMap<CellValue, f64>) -> BTreeMap<CellValue, f64> {
    let mut values: Vec<f64> = raw_scores.values().copied().collect();
    let med = median(&mut values);
    let floor = 1.0 / raw_scores.len() as f64;
    let divisor = if med < floor { floor } else { med };
    raw_scores
        .iter()
        .map(|(unit, score)| (unit.clone(), score / divisor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use svq_model::FrequencyTable;

    fn float_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    fn table(counts: &[(&str, u64)]) -> FrequencyTable {
        counts
            .iter()
            .map(|(k, v)| (CellValue::from(*k), *v))
            .collect()
    }

    fn frequencies(units: &[(&str, &[(&str, u64)])]) -> FrequenciesByUnit {
        units
            .iter()
            .map(|(unit, counts)| (CellValue::from(*unit), table(counts)))
            .collect()
    }

    #[test]
    fn compute_outlier_scores_reference_case() {
        let input = frequencies(&[
            ("a", &[("y", 8), ("n", 1), ("-", 1)]),
            ("b", &[("y", 14), ("n", 4), ("-", 2)]),
            ("c", &[("y", 1), ("n", 0), ("-", 1)]),
            ("d", &[("y", 9), ("n", 1), ("-", 0)]),
            ("e", &[("y", 18), ("n", 12), ("-", 0)]),
        ]);
        let output = SValueModel::new()
            .compute_outlier_scores(&input)
            .expect("five units score");
        assert_eq!(output.scores.len(), 5);
        assert!(float_eq(output.scores[&CellValue::from("a")], 0.333333));
        assert!(float_eq(output.scores[&CellValue::from("b")], 0.333333));
        assert!(float_eq(output.scores[&CellValue::from("c")], 2.333333));
        assert!(float_eq(output.scores[&CellValue::from("d")], 1.0));
        assert!(float_eq(output.scores[&CellValue::from("e")], 1.666667));
        // No distributional test, so no p-values.
        assert!(output.p_values.values().all(|p| p.is_none()));
    }

    #[test]
    fn integer_category_labels_score_identically() {
        let input = frequencies(&[
            ("a", &[("y", 8), ("n", 1), ("-", 1)]),
            ("b", &[("y", 14), ("n", 4), ("-", 2)]),
            ("c", &[("y", 1), ("n", 0), ("-", 1)]),
            ("d", &[("y", 9), ("n", 1), ("-", 0)]),
            ("e", &[("y", 18), ("n", 12), ("-", 0)]),
        ]);
        let numeric: FrequenciesByUnit = input
            .iter()
            .map(|(unit, counts)| {
                let recoded = counts
                    .values()
                    .enumerate()
                    .map(|(code, count)| (CellValue::Int(code as i64), *count))
                    .collect();
                (unit.clone(), recoded)
            })
            .collect();
        let model = SValueModel::new();
        let labelled_scores = model.compute_outlier_scores(&input).expect("labelled");
        let numeric_scores = model.compute_outlier_scores(&numeric).expect("numeric");
        for unit in labelled_scores.scores.keys() {
            assert!(float_eq(
                labelled_scores.scores[unit],
                numeric_scores.scores[unit]
            ));
        }
    }

    #[test]
    fn fewer_than_two_units_is_an_error() {
        let input = frequencies(&[("a", &[("y", 1)])]);
        let err = SValueModel::new()
            .compute_outlier_scores(&input)
            .unwrap_err();
        assert!(matches!(err, ScoreError::InsufficientUnits { found: 1 }));
    }

    #[test]
    fn zero_count_unit_scores_zero_and_keeps_its_record() {
        let input = frequencies(&[
            ("a", &[("y", 3), ("n", 1)]),
            ("b", &[("y", 1), ("n", 3)]),
            ("quiet", &[("y", 0), ("n", 0)]),
        ]);
        let output = SValueModel::new()
            .compute_outlier_scores(&input)
            .expect("three units score");
        assert_eq!(output.scores.len(), 3);
        assert_eq!(output.scores[&CellValue::from("quiet")], 0.0);
        assert!(output.scores[&CellValue::from("a")].is_finite());
        assert!(output.scores[&CellValue::from("a")] >= 0.0);
        // The silent unit was never normalized; its reference table is empty.
        assert!(output.expected[&CellValue::from("quiet")].is_empty());
        assert_eq!(output.p_values[&CellValue::from("quiet")], None);
    }

    #[test]
    fn all_zero_units_score_zero() {
        let input = frequencies(&[
            ("a", &[("y", 0), ("n", 0)]),
            ("b", &[("y", 0), ("n", 0)]),
        ]);
        let output = SValueModel::new()
            .compute_outlier_scores(&input)
            .expect("two silent units score");
        assert!(output.scores.values().all(|&score| score == 0.0));
    }

    #[test]
    fn identical_input_produces_identical_output() {
        let input = frequencies(&[
            ("a", &[("y", 8), ("n", 1), ("-", 1)]),
            ("b", &[("y", 14), ("n", 4), ("-", 2)]),
        ]);
        let model = SValueModel::new();
        let first = model.compute_outlier_scores(&input).expect("first run");
        let second = model.compute_outlier_scores(&input).expect("second run");
        assert_eq!(first.scores, second.scores);
        assert_eq!(first.expected, second.expected);
    }
}
