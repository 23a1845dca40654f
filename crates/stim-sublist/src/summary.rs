use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rotation::Sublist;

/// Marker written when a column needed for the summary is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of `<prefix>_summary.csv`: which variant a seed received in a sublist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub sublist: usize,
    pub seed: String,
    pub entropy: f64,
    pub target_word: String,
    pub trial_number: usize,
}

/// Flattens the selections of every sublist, sublist-major.
pub fn summary_records(sublists: &[Sublist]) -> Vec<SummaryRecord> {
    sublists
        .iter()
        .flat_map(|sublist| {
            sublist.selections.iter().map(move |selection| SummaryRecord {
                sublist: sublist.index,
                seed: selection.seed.clone(),
                entropy: selection.entropy,
                target_word: selection
                    .target_word
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                trial_number: selection.trial_number,
            })
        })
        .collect()
}

/// Entropy assigned to one seed in each sublist, in sublist order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub seed: String,
    pub entropies: Vec<f64>,
}

impl PivotRow {
    /// True when entropy never decreases from sublist 1 onwards.
    pub fn is_non_decreasing(&self) -> bool {
        self.entropies.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// Seed by sublist grid of assigned entropies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotView {
    pub sublists: Vec<usize>,
    pub rows: Vec<PivotRow>,
}

impl PivotView {
    pub fn from_records(records: &[SummaryRecord], sublist_count: usize) -> Self {
        let mut index: IndexMap<&str, usize> = IndexMap::new();
        let mut rows: Vec<PivotRow> = Vec::new();
        for record in records {
            let at = *index.entry(record.seed.as_str()).or_insert_with(|| {
                rows.push(PivotRow {
                    seed: record.seed.clone(),
                    entropies: vec![f64::NAN; sublist_count],
                });
                rows.len() - 1
            });
            if let Some(cell) = rows[at].entropies.get_mut(record.sublist.saturating_sub(1)) {
                *cell = record.entropy;
            }
        }
        Self {
            sublists: (1..=sublist_count).collect(),
            rows,
        }
    }

    /// Number of seeds whose entropy rises (or stays level) across sublists.
    pub fn non_decreasing_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_non_decreasing()).count()
    }

    /// Plain-text grid for operator review.
    pub fn render(&self) -> String {
        let seed_width = self
            .rows
            .iter()
            .map(|row| row.seed.chars().count())
            .chain(std::iter::once("seed".len()))
            .max()
            .unwrap_or(4);
        let mut out = String::new();
        let _ = write!(out, "{:<seed_width$}", "seed");
        for sublist in &self.sublists {
            let _ = write!(out, "  {:>8}", sublist);
        }
        out.push('\n');
        for row in &self.rows {
            let _ = write!(out, "{:<seed_width$}", row.seed);
            for value in &row.entropies {
                if value.is_nan() {
                    let _ = write!(out, "  {:>8}", "NaN");
                } else {
                    let _ = write!(out, "  {:>8.4}", value);
                }
            }
            out.push('\n');
        }
        out
    }
}
