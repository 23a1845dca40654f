mod common;

use std::fs;

use common::trial_table;
use stim_core::errors::StimError;
use stim_core::{read_csv, write_csv};
use stim_sublist::{generate_file, summary_path, sublist_path, write_report, SublistConfig};
use tempfile::tempdir;

fn seed_rows() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("7", "0.9", "dog"),
        ("7", "0.1", "cat"),
        ("7", "0.5", "owl"),
        ("7", "0.3", "elk"),
        ("8", "0.2", "sun"),
        ("8", "0.4", "sky"),
        ("8", "0.8", "sea"),
        ("8", "0.6", "ice"),
    ]
}

#[test]
fn generation_writes_four_sublists_and_summary() -> Result<(), StimError> {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("trials.csv");
    write_csv(&trial_table(&seed_rows()), &input)?;

    let out_dir = dir.path().join("out");
    let run = generate_file(&input, &SublistConfig::default(), &out_dir)?;
    assert_eq!(run.outputs.len(), 5);
    for index in 1..=4 {
        let table = read_csv(&sublist_path(&out_dir, "trial_list_sublist", index))?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().last().map(String::as_str), Some("trial_number"));
    }

    let summary = fs::read_to_string(summary_path(&out_dir, "trial_list_sublist")).expect("summary");
    let mut lines = summary.lines();
    assert_eq!(lines.next(), Some("sublist,seed,entropy,target_word,trial_number"));
    assert_eq!(lines.next(), Some("1,7,0.1,cat,1"));
    assert_eq!(lines.next(), Some("1,8,0.2,sun,2"));
    assert_eq!(summary.lines().count(), 9);

    assert_eq!(run.report.seeds_retained, 2);
    assert_eq!(run.report.pivot_non_decreasing, 2);
    assert_eq!(run.report.input_sha256.as_deref().map(str::len), Some(64));
    Ok(())
}

#[test]
fn failed_generation_leaves_no_files() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("trials.csv");
    write_csv(&trial_table(&seed_rows()[..3]), &input).expect("write input");
    let out_dir = dir.path().join("out");
    let err = generate_file(&input, &SublistConfig::default(), &out_dir).unwrap_err();
    assert!(matches!(err, StimError::InsufficientData(_)));
    assert!(!out_dir.exists());
}

#[test]
fn custom_prefix_and_report_are_deterministic() -> Result<(), StimError> {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("trials.csv");
    write_csv(&trial_table(&seed_rows()), &input)?;
    let config = SublistConfig {
        output_prefix: "pilot".to_string(),
        ..SublistConfig::default()
    };
    let run_a = generate_file(&input, &config, dir.path())?;
    let run_b = generate_file(&input, &config, dir.path())?;
    assert!(dir.path().join("pilot_4.csv").exists());
    assert!(dir.path().join("pilot_summary.csv").exists());

    let report_a = dir.path().join("a.json");
    let report_b = dir.path().join("b.json");
    write_report(&run_a.report, &report_a)?;
    write_report(&run_b.report, &report_b)?;
    assert_eq!(fs::read(&report_a).unwrap(), fs::read(&report_b).unwrap());
    Ok(())
}
