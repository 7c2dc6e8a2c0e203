//! Multinomial Model Algorithm: chi-square comparison against peers.

use std::collections::BTreeMap;

use statrs::distribution::{ChiSquared, ContinuousCDF};

use svq_model::{FrequenciesByUnit, FrequencyTable, RealTable};

use crate::FLOAT_EQ_DELTA;
use crate::error::{Result, ScoreError};
use crate::model::{ModelOutput, ScoringModel};
use crate::normalize::{counts_to_real, normalize_counts};

/// Chi-square-based outlier scoring.
///
/// Each unit's observed distribution is tested against the pooled
/// distribution of its peers (every other unit), rescaled to the unit's own
/// response total. Available only with the `mma` cargo feature, which pulls
/// in the chi-square distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultinomialModel;

impl MultinomialModel {
    pub fn new() -> Self {
        Self
    }
}

impl ScoringModel for MultinomialModel {
    fn name(&self) -> &'static str {
        "mma"
    }

    fn compute_outlier_scores(&self, frequencies: &FrequenciesByUnit) -> Result<ModelOutput> {
        if frequencies.len() < 2 {
            return Err(ScoreError::InsufficientUnits {
                found: frequencies.len(),
            });
        }
        let pooled = sum_frequencies(frequencies);
        let categories = pooled.len();

        let mut scores = BTreeMap::new();
        let mut expected = BTreeMap::new();
        let mut p_values = BTreeMap::new();

        for (unit, observed) in frequencies {
            // The unit's reference distribution: everything its peers
            // reported, i.e. pooled totals minus its own counts.
            let peers: FrequencyTable = pooled
                .iter()
                .map(|(category, total)| {
                    let own = observed.get(category).copied().unwrap_or(0);
                    (category.clone(), total - own)
                })
                .collect();
            let peer_total: u64 = peers.values().sum();
            if peer_total == 0 {
                // No peer evidence to judge this unit against.
                scores.insert(unit.clone(), 0.0);
                p_values.insert(unit.clone(), Some(1.0));
            } else {
                let own_total: u64 = observed.values().sum();
                let expected_counts = normalize_counts(&counts_to_real(&peers), own_total as f64);
                let (statistic, p_value) = chi_square_statistic(&expected_counts, observed)?;
                scores.insert(unit.clone(), -survival(statistic, categories - 1).ln());
                p_values.insert(unit.clone(), Some(p_value));
            }
            expected.insert(unit.clone(), counts_to_real(&peers));
        }

        Ok(ModelOutput {
            scores,
            expected,
            p_values,
        })
    }
}

/// Pooled count per category across all units.
fn sum_frequencies(frequencies: &FrequenciesByUnit) -> FrequencyTable {
    let mut pooled = FrequencyTable::new();
    for table in frequencies.values() {
        for (category, count) in table {
            *pooled.entry(category.clone()).or_insert(0) += count;
        }
    }
    pooled
}

/// X² statistic of `observed` against `expected`, plus its p-value at
/// `categories` degrees of freedom.
///
/// The `max(expected, 1.0)` denominator floor is a smoothing policy kept
/// for numerical compatibility; it is not the textbook statistic.
fn chi_square_statistic(expected: &RealTable, observed: &FrequencyTable) -> Result<(f64, f64)> {
    if !expected.keys().eq(observed.keys()) {
        return Err(ScoreError::RangeMismatch(
            "category ranges of the two tables differ".to_string(),
        ));
    }
    let observed_total: f64 = observed.values().map(|count| *count as f64).sum();
    let expected_total: f64 = expected.values().sum();
    if (observed_total - expected_total).abs() > FLOAT_EQ_DELTA {
        return Err(ScoreError::RangeMismatch(format!(
            "table totals differ: {observed_total} vs {expected_total}"
        )));
    }
    let statistic: f64 = expected
        .values()
        .zip(observed.values())
        .map(|(exp, obs)| {
            let obs = *obs as f64;
            (obs - exp).powi(2) / exp.max(1.0)
        })
        .sum();
    let p_value = 1.0 - cdf(statistic, expected.len());
    Ok((statistic, p_value))
}

/// Upper-tail probability of the chi-square distribution.
///
/// A zero-df range (single category) carries no information; the survival
/// function is taken as 1 there, which maps to score 0.
fn survival(statistic: f64, df: usize) -> f64 {
    match ChiSquared::new(df as f64) {
        Ok(dist) => dist.sf(statistic),
        Err(_) => 1.0,
    }
}

fn cdf(statistic: f64, df: usize) -> f64 {
    match ChiSquared::new(df as f64) {
        Ok(dist) => dist.cdf(statistic),
        Err(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svq_model::CellValue;

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
            ("a", &[("y", 12), ("n", 23), ("-", 11)]),
            ("b", &[("y", 23), ("n", 49), ("-", 39)]),
            ("c", &[("y", 16), ("n", 12), ("-", 14)]),
        ]);
        let output = MultinomialModel::new()
            .compute_outlier_scores(&input)
            .expect("three units score");
        assert_eq!(output.scores.len(), 3);
        assert!(float_eq(output.scores[&CellValue::from("a")], 1.3593));
        assert!(float_eq(output.scores[&CellValue::from("b")], 3.2995));
        assert!(float_eq(output.scores[&CellValue::from("c")], 3.7355));
        // Every unit gets a p-value under this model.
        assert!(output.p_values.values().all(|p| p.is_some()));
    }

    #[test]
    fn integer_category_labels_score_identically() {
        let labelled = frequencies(&[
            ("a", &[("y", 12), ("n", 23), ("-", 11)]),
            ("b", &[("y", 23), ("n", 49), ("-", 39)]),
            ("c", &[("y", 16), ("n", 12), ("-", 14)]),
        ]);
        let numeric: FrequenciesByUnit = labelled
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
        let model = MultinomialModel::new();
        let labelled_scores = model.compute_outlier_scores(&labelled).expect("labelled");
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
        let input = frequencies(&[("a", &[("y", 1), ("n", 2)])]);
        let err = MultinomialModel::new()
            .compute_outlier_scores(&input)
            .unwrap_err();
        assert!(matches!(err, ScoreError::InsufficientUnits { found: 1 }));
    }

    #[test]
    fn zero_count_units_score_zero() {
        let input = frequencies(&[
            ("quiet", &[("y", 0), ("n", 0)]),
            ("busy", &[("y", 3), ("n", 1)]),
        ]);
        let output = MultinomialModel::new()
            .compute_outlier_scores(&input)
            .expect("two units score");
        // The silent unit has nothing to test; the busy unit has no peers
        // with data. Both fall back to score 0 with p-value 1.
        assert_eq!(output.scores[&CellValue::from("quiet")], 0.0);
        assert_eq!(output.scores[&CellValue::from("busy")], 0.0);
        assert_eq!(output.p_values[&CellValue::from("busy")], Some(1.0));
    }

    #[test]
    fn mismatched_category_ranges_are_rejected() {
        let mut input = frequencies(&[
            ("a", &[("y", 5), ("n", 3)]),
            ("b", &[("y", 4), ("n", 2)]),
        ]);
        input
            .get_mut(&CellValue::from("b"))
            .expect("unit b present")
            .remove(&CellValue::from("n"));
        let err = MultinomialModel::new()
            .compute_outlier_scores(&input)
            .unwrap_err();
        assert!(matches!(err, ScoreError::RangeMismatch(_)));
    }

    #[test]
    fn identical_input_produces_identical_output() {
        let input = frequencies(&[
            ("a", &[("y", 12), ("n", 23), ("-", 11)]),
            ("b", &[("y", 23), ("n", 49), ("-", 39)]),
        ]);
        let model = MultinomialModel::new();
        let first = model.compute_outlier_scores(&input).expect("first run");
        let second = model.compute_outlier_scores(&input).expect("second run");
        assert_eq!(first.scores, second.scores);
        assert_eq!(first.expected, second.expected);
        assert_eq!(first.p_values, second.p_values);
    }
}
