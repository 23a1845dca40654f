use std::collections::BTreeSet;

use proptest::prelude::*;
use stim_core::TrialTable;
use stim_sublist::{generate, SublistConfig, SUBLIST_COUNT};

fn build_table(groups: &[Vec<u16>]) -> TrialTable {
    let headers = ["seed_id", "entropy", "target_word"]
        .into_iter()
        .map(String::from)
        .collect();
    let mut rows = Vec::new();
    for (seed, entropies) in groups.iter().enumerate() {
        for (variant, entropy) in entropies.iter().enumerate() {
            rows.push(vec![
                format!("seed{seed}"),
                format!("{}", f64::from(*entropy) / 100.0),
                format!("w{seed}_{variant}"),
            ]);
        }
    }
    TrialTable::from_rows(headers, rows).unwrap()
}

proptest! {
    #[test]
    fn every_sublist_takes_one_variant_per_eligible_seed(
        groups in prop::collection::vec(prop::collection::vec(0u16..1000, 1..9), 1..8)
    ) {
        let table = build_table(&groups);
        let eligible: BTreeSet<String> = groups
            .iter()
            .enumerate()
            .filter(|(_, variants)| variants.len() >= 4)
            .map(|(seed, _)| format!("seed{seed}"))
            .collect();
        let result = generate(&table, &SublistConfig::default());
        if eligible.is_empty() {
            prop_assert!(result.is_err());
            return Ok(());
        }
        let generation = result.unwrap();
        prop_assert_eq!(generation.sublists.len(), SUBLIST_COUNT);
        for sublist in &generation.sublists {
            let seeds: Vec<_> = sublist.selections.iter().map(|s| s.seed.clone()).collect();
            let unique: BTreeSet<_> = seeds.iter().cloned().collect();
            prop_assert_eq!(seeds.len(), unique.len());
            prop_assert_eq!(&unique, &eligible);
            prop_assert_eq!(sublist.table.len(), eligible.len());
        }
        prop_assert_eq!(generation.summary.len(), SUBLIST_COUNT * eligible.len());
    }

    #[test]
    fn four_variant_groups_rise_across_sublists(
        groups in prop::collection::vec(prop::collection::vec(0u16..1000, 4..5), 1..6)
    ) {
        let table = build_table(&groups);
        let generation = generate(&table, &SublistConfig::default()).unwrap();
        for row in &generation.pivot.rows {
            prop_assert!(row.is_non_decreasing(), "seed {} not monotone: {:?}", row.seed, row.entropies);
        }
        for seed in 0..groups.len() {
            let rows: BTreeSet<_> = generation
                .sublists
                .iter()
                .flat_map(|sublist| sublist.selections.iter())
                .filter(|selection| selection.seed == format!("seed{seed}"))
                .map(|selection| selection.source_row)
                .collect();
            prop_assert_eq!(rows.len(), 4);
        }
    }
}
