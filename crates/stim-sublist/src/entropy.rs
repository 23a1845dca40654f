use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use stim_core::TrialTable;
use tracing::warn;

/// Parses the entropy column. Empty or non-numeric cells become `NaN`.
pub fn parse_entropies(table: &TrialTable, column: usize, name: &str) -> Vec<f64> {
    (0..table.len())
        .map(|row| match table.value(row, column) {
            Some(raw) => raw.trim().parse::<f64>().unwrap_or_else(|_| {
                warn!("row {row}: {name} value '{raw}' is not numeric; ranking it last");
                f64::NAN
            }),
            None => {
                warn!("row {row}: {name} value missing; ranking it last");
                f64::NAN
            }
        })
        .collect()
}

/// Ascending order with `NaN` after every number.
pub fn compare_entropy(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Stable sort of row indices by their entropy; ties keep input order.
pub fn sort_by_entropy(rows: &[usize], entropies: &[f64]) -> Vec<usize> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|&a, &b| compare_entropy(entropies[a], entropies[b]));
    sorted
}

/// Descriptive statistics over the numeric entropies of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl EntropyStats {
    /// `None` when no value is numeric.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|value| !value.is_nan()) {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_row_order_and_nan_sinks() {
        let entropies = [0.5, f64::NAN, 0.1, 0.5, 0.1];
        assert_eq!(sort_by_entropy(&[0, 1, 2, 3, 4], &entropies), vec![2, 4, 0, 3, 1]);
    }

    #[test]
    fn stats_skip_missing_values() {
        let stats = EntropyStats::from_values([0.2, f64::NAN, 0.6]).unwrap();
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.6);
        assert!((stats.mean - 0.4).abs() < 1e-12);
        assert!(EntropyStats::from_values([f64::NAN]).is_none());
    }
}
