use std::collections::BTreeMap;

use indexmap::IndexMap;
use stim_core::TrialTable;

/// Index from seed value to the rows sharing it. Seeds keep the order in
/// which they were first encountered; rows keep table order within a seed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedGroups {
    groups: IndexMap<String, Vec<usize>>,
    /// Rows whose seed cell was empty and therefore belong to no group.
    pub unseeded_rows: Vec<usize>,
}

impl SeedGroups {
    /// Groups the rows of `table` by the value in `seed_column`.
    pub fn build(table: &TrialTable, seed_column: usize) -> Self {
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut unseeded_rows = Vec::new();
        for row in 0..table.len() {
            match table.value(row, seed_column) {
                Some(seed) => groups.entry(seed.to_string()).or_default().push(row),
                None => unseeded_rows.push(row),
            }
        }
        Self {
            groups,
            unseeded_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups
            .iter()
            .map(|(seed, rows)| (seed.as_str(), rows.as_slice()))
    }

    /// Number of seeds per group size.
    pub fn size_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for rows in self.groups.values() {
            *distribution.entry(rows.len()).or_insert(0) += 1;
        }
        distribution
    }

    pub fn max_size(&self) -> usize {
        self.groups.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Splits off the groups with fewer than `min_variants` rows, returning
    /// their seeds. Retained groups keep their relative order.
    pub fn retain_min_size(&mut self, min_variants: usize) -> Vec<String> {
        let mut excluded = Vec::new();
        self.groups.retain(|seed, rows| {
            let keep = rows.len() >= min_variants;
            if !keep {
                excluded.push(seed.clone());
            }
            keep
        });
        excluded
    }
}
