use stim_core::TrialTable;

/// Builds a trial table with `seed_id, entropy, target_word, passage_variant` columns.
pub fn trial_table(rows: &[(&str, &str, &str)]) -> TrialTable {
    let headers = ["seed_id", "entropy", "target_word", "passage_variant"]
        .into_iter()
        .map(String::from)
        .collect();
    let rows = rows
        .iter()
        .map(|(seed, entropy, target)| {
            vec![
                seed.to_string(),
                entropy.to_string(),
                target.to_string(),
                format!("a passage about {target}."),
            ]
        })
        .collect();
    TrialTable::from_rows(headers, rows).expect("well formed rows")
}
