use std::collections::BTreeMap;

use stim_core::errors::{ErrorInfo, StimError};
use stim_core::{available_columns, require_column, resolve_column, TrialTable};
use tracing::{info, warn};

use crate::config::SublistConfig;
use crate::entropy::{parse_entropies, sort_by_entropy, EntropyStats};
use crate::grouping::SeedGroups;
use crate::summary::{summary_records, PivotView, SummaryRecord};

/// Number of counterbalanced sublists produced per run.
pub const SUBLIST_COUNT: usize = 4;
/// Column tagging each output row with its 1-based sublist index.
pub const SUBLIST_COLUMN: &str = "sublist";
/// Column renumbered 1..N within every sublist.
pub const TRIAL_NUMBER_COLUMN: &str = "trial_number";

/// Rank (0-based, in ascending entropy order) that sublist `sublist`
/// (1-based) takes from a group of `group_size` variants.
///
/// Groups larger than [`SUBLIST_COUNT`] wrap cyclically, so some variants
/// go unused; with a threshold below four, ranks repeat across sublists.
pub fn variant_rank(sublist: usize, group_size: usize) -> usize {
    (sublist.saturating_sub(1)) % group_size.max(1)
}

/// Variant chosen for one seed within one sublist.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub seed: String,
    /// Position in the entropy-sorted group, 0-based.
    pub rank: usize,
    pub group_size: usize,
    /// Row index in the input table.
    pub source_row: usize,
    pub entropy: f64,
    pub target_word: Option<String>,
    pub trial_number: usize,
}

/// One output trial list.
#[derive(Debug, Clone, PartialEq)]
pub struct Sublist {
    /// 1-based sublist index.
    pub index: usize,
    pub table: TrialTable,
    pub selections: Vec<Selection>,
}

impl Sublist {
    pub fn entropy_stats(&self) -> Option<EntropyStats> {
        EntropyStats::from_values(self.selections.iter().map(|selection| selection.entropy))
    }
}

/// Column names the generator settled on for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub seed: String,
    pub entropy: String,
    /// False when the entropy column was missing and filled with zeros.
    pub entropy_present: bool,
    pub target: Option<String>,
}

/// Everything a generation run computed, before anything touches disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub columns: ResolvedColumns,
    pub min_variants: usize,
    pub total_rows: usize,
    pub unseeded_rows: usize,
    /// Group size to number of seeds, before the threshold is applied.
    pub size_distribution: BTreeMap<usize, usize>,
    pub seeds_total: usize,
    pub excluded_seeds: Vec<String>,
    pub retained_rows: usize,
    pub entropy_range: Option<EntropyStats>,
    pub sublists: Vec<Sublist>,
    pub summary: Vec<SummaryRecord>,
    pub pivot: PivotView,
}

impl Generation {
    pub fn retained_seeds(&self) -> usize {
        self.seeds_total - self.excluded_seeds.len()
    }
}

/// Picks the seed column: the configured name when set, otherwise the first
/// candidate present in the header.
pub fn resolve_seed_column(table: &TrialTable, config: &SublistConfig) -> Result<String, StimError> {
    if let Some(explicit) = &config.seed_column {
        if table.has_column(explicit) {
            return Ok(explicit.clone());
        }
        return Err(StimError::Config(
            ErrorInfo::new(
                "stim.seed_column_missing",
                format!("seed column '{explicit}' not found in CSV"),
            )
            .with_context("column", explicit.as_str())
            .with_context("available", available_columns(table)),
        ));
    }
    match resolve_column(table, &config.seed_column_candidates) {
        Some(found) => {
            info!("Auto-detected seed column: '{found}'");
            Ok(found.to_string())
        }
        None => Err(StimError::Config(
            ErrorInfo::new("stim.seed_column_missing", "no seed column found")
                .with_context("candidates", config.seed_column_candidates.join(", "))
                .with_context("available", available_columns(table))
                .with_hint("pass --seed-column with the column identifying seed passages"),
        )),
    }
}

/// Splits `table` into [`SUBLIST_COUNT`] counterbalanced sublists.
///
/// Rows are grouped by seed, groups below `min_variants` are dropped, each
/// remaining group is sorted by ascending entropy (stable), and sublist `s`
/// takes the variant at rank `(s - 1) mod n` from every group. Fails with
/// [`StimError::Config`] when no seed column resolves and with
/// [`StimError::InsufficientData`] when no group meets the threshold.
pub fn generate(table: &TrialTable, config: &SublistConfig) -> Result<Generation, StimError> {
    config.validate()?;
    info!(
        "Loaded {} rows; columns: [{}]",
        table.len(),
        available_columns(table)
    );
    let seed_name = resolve_seed_column(table, config)?;

    let mut working = table.clone();
    let entropy_name = config.entropy_column.clone();
    let entropy_present = working.has_column(&entropy_name);
    let entropies = match working.column_index(&entropy_name) {
        Some(idx) => parse_entropies(&working, idx, &entropy_name),
        None => {
            warn!("'{entropy_name}' column not found; cannot sort by entropy, using 0");
            working.set_column(&entropy_name, vec!["0".to_string(); working.len()])?;
            vec![0.0; working.len()]
        }
    };
    let target_idx = working.column_index(&config.target_column);

    let seed_idx = require_column(&working, &seed_name, "stim.seed_column_missing")?;
    let mut groups = SeedGroups::build(&working, seed_idx);
    if !groups.unseeded_rows.is_empty() {
        warn!(
            "{} rows have no '{seed_name}' value and are ignored",
            groups.unseeded_rows.len()
        );
    }
    let seeds_total = groups.len();
    let size_distribution = groups.size_distribution();
    let max_size = groups.max_size();
    info!("Found {seeds_total} unique seed passages");
    for (size, seeds) in &size_distribution {
        info!("  {size} variants: {seeds} seeds");
    }

    let excluded_seeds = groups.retain_min_size(config.min_variants);
    if groups.is_empty() {
        return Err(StimError::InsufficientData(
            ErrorInfo::new(
                "stim.insufficient_variants",
                format!("no seeds have {}+ variants", config.min_variants),
            )
            .with_context("min_variants", config.min_variants.to_string())
            .with_context("max_variants_found", max_size.to_string())
            .with_context("seeds", seeds_total.to_string()),
        ));
    }
    if !excluded_seeds.is_empty() {
        warn!(
            "Excluding {} seeds with fewer than {} variants",
            excluded_seeds.len(),
            config.min_variants
        );
    }

    let sorted: Vec<(&str, Vec<usize>)> = groups
        .iter()
        .map(|(seed, rows)| (seed, sort_by_entropy(rows, &entropies)))
        .collect();
    let retained_rows: usize = sorted.iter().map(|(_, rows)| rows.len()).sum();
    let entropy_range = EntropyStats::from_values(
        sorted
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|&row| entropies[row])),
    );
    info!("Using {retained_rows} rows from {} seeds", sorted.len());
    if let Some(range) = &entropy_range {
        info!("Entropy range: {:.4} to {:.4}", range.min, range.max);
    }

    let mut sublists = Vec::with_capacity(SUBLIST_COUNT);
    for index in 1..=SUBLIST_COUNT {
        info!("Creating sublist {index}");
        let mut rows = Vec::with_capacity(sorted.len());
        let mut selections = Vec::with_capacity(sorted.len());
        for (seed, ranked) in &sorted {
            let rank = variant_rank(index, ranked.len());
            let row = ranked[rank];
            let target_word = target_idx
                .and_then(|col| working.value(row, col))
                .map(str::to_string);
            info!(
                "  Seed {seed}: selected variant {}/{} (entropy={:.4}, target='{}')",
                rank + 1,
                ranked.len(),
                entropies[row],
                target_word.as_deref().unwrap_or("N/A")
            );
            rows.push(row);
            selections.push(Selection {
                seed: seed.to_string(),
                rank,
                group_size: ranked.len(),
                source_row: row,
                entropy: entropies[row],
                target_word,
                trial_number: selections.len() + 1,
            });
        }
        let mut sublist_table = working.select(&rows);
        sublist_table.set_column(SUBLIST_COLUMN, vec![index.to_string(); rows.len()])?;
        sublist_table.set_column(
            TRIAL_NUMBER_COLUMN,
            (1..=rows.len()).map(|n| n.to_string()).collect(),
        )?;
        let sublist = Sublist {
            index,
            table: sublist_table,
            selections,
        };
        if let Some(stats) = sublist.entropy_stats() {
            info!(
                "Sublist {index}: {} trials, entropy min={:.4}, max={:.4}, mean={:.4}",
                sublist.selections.len(),
                stats.min,
                stats.max,
                stats.mean
            );
        }
        sublists.push(sublist);
    }

    let summary = summary_records(&sublists);
    let pivot = PivotView::from_records(&summary, SUBLIST_COUNT);

    Ok(Generation {
        columns: ResolvedColumns {
            seed: seed_name,
            entropy: entropy_name,
            entropy_present,
            target: target_idx.map(|_| config.target_column.clone()),
        },
        min_variants: config.min_variants,
        total_rows: table.len(),
        unseeded_rows: groups.unseeded_rows.len(),
        size_distribution,
        seeds_total,
        excluded_seeds,
        retained_rows,
        entropy_range,
        sublists,
        summary,
        pivot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_rotate_cyclically() {
        let four: Vec<_> = (1..=4).map(|s| variant_rank(s, 4)).collect();
        assert_eq!(four, vec![0, 1, 2, 3]);
        let six: Vec<_> = (1..=4).map(|s| variant_rank(s, 6)).collect();
        assert_eq!(six, vec![0, 1, 2, 3]);
        let two: Vec<_> = (1..=4).map(|s| variant_rank(s, 2)).collect();
        assert_eq!(two, vec![0, 1, 0, 1]);
    }
}
