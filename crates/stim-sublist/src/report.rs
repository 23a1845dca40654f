use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::entropy::EntropyStats;
use crate::rotation::Generation;

/// Per-sublist line of a [`GenerationReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SublistStats {
    pub index: usize,
    pub trials: usize,
    pub entropy: Option<EntropyStats>,
    /// Sorted distinct 0-based ranks taken from the entropy-sorted groups.
    pub ranks: Vec<usize>,
}

/// Provenance and verification record for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub input: Option<String>,
    pub input_sha256: Option<String>,
    pub seed_column: String,
    pub entropy_column: String,
    pub entropy_column_present: bool,
    pub target_column: Option<String>,
    pub min_variants: usize,
    pub total_rows: usize,
    pub unseeded_rows: usize,
    pub seeds_total: usize,
    pub seeds_retained: usize,
    pub seeds_excluded: Vec<String>,
    pub rows_retained: usize,
    /// Keyed by group size rendered as text so the JSON object stays valid.
    pub variants_per_seed: BTreeMap<String, usize>,
    pub entropy_range: Option<EntropyStats>,
    pub sublists: Vec<SublistStats>,
    pub pivot_non_decreasing: usize,
    pub outputs: Vec<String>,
}

impl GenerationReport {
    pub fn build(
        generation: &Generation,
        input: Option<String>,
        input_sha256: Option<String>,
        outputs: &[PathBuf],
    ) -> Self {
        let sublists = generation
            .sublists
            .iter()
            .map(|sublist| {
                let mut ranks: Vec<usize> = sublist.selections.iter().map(|s| s.rank).collect();
                ranks.sort_unstable();
                ranks.dedup();
                SublistStats {
                    index: sublist.index,
                    trials: sublist.selections.len(),
                    entropy: sublist.entropy_stats(),
                    ranks,
                }
            })
            .collect();
        Self {
            input,
            input_sha256,
            seed_column: generation.columns.seed.clone(),
            entropy_column: generation.columns.entropy.clone(),
            entropy_column_present: generation.columns.entropy_present,
            target_column: generation.columns.target.clone(),
            min_variants: generation.min_variants,
            total_rows: generation.total_rows,
            unseeded_rows: generation.unseeded_rows,
            seeds_total: generation.seeds_total,
            seeds_retained: generation.retained_seeds(),
            seeds_excluded: generation.excluded_seeds.clone(),
            rows_retained: generation.retained_rows,
            variants_per_seed: generation
                .size_distribution
                .iter()
                .map(|(size, seeds)| (size.to_string(), *seeds))
                .collect(),
            entropy_range: generation.entropy_range,
            sublists,
            pivot_non_decreasing: generation.pivot.non_decreasing_count(),
            outputs: outputs
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
    }
}
