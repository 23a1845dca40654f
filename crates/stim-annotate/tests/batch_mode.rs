use std::fs;

use stim_annotate::{preprocess_file, process_batch, AnnotateConfig};
use stim_core::errors::StimError;
use stim_core::read_csv;
use tempfile::tempdir;

const STIMULI: &str = "target_word,passage_variant\nrunning,She was running.\nowl,No birds here\n";

#[test]
fn explicit_output_leaves_input_untouched() -> Result<(), StimError> {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("stimuli.csv");
    let output = dir.path().join("annotated.csv");
    fs::write(&input, STIMULI).expect("write input");

    let report = preprocess_file(&input, Some(&output), &AnnotateConfig::default())?;
    assert_eq!(report.found, 1);
    assert_eq!(fs::read_to_string(&input).expect("read input"), STIMULI);

    let annotated = read_csv(&output)?;
    let col = annotated.column_index("target_word_position").unwrap();
    assert_eq!(annotated.value(0, col), Some("2"));
    assert_eq!(annotated.value(1, col), Some("-1"));
    Ok(())
}

#[test]
fn repeated_runs_yield_identical_positions() -> Result<(), StimError> {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("stimuli.csv");
    fs::write(&input, STIMULI).expect("write input");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let config = AnnotateConfig::default();
    preprocess_file(&input, Some(&first), &config)?;
    preprocess_file(&first, Some(&second), &config)?;
    assert_eq!(
        fs::read_to_string(&first).expect("first"),
        fs::read_to_string(&second).expect("second")
    );
    Ok(())
}

#[test]
fn batch_skips_missing_and_survives_bad_files() {
    let dir = tempdir().expect("tempdir");
    let config = AnnotateConfig::default();
    let files = config.batch_files(dir.path());
    fs::write(&files[0], STIMULI).expect("primary");
    fs::write(&files[1], "target_word,other\nx,y\n").expect("no passage column");
    fs::write(&files[3], STIMULI).expect("sublist 3");

    let outcome = process_batch(&files, &config);
    assert_eq!(outcome.processed_count(), 2);
    assert_eq!(outcome.skipped, vec![files[2].clone(), files[4].clone()]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].1.info().code, "stim.passage_column_missing");

    let annotated = read_csv(&files[0]).expect("annotated in place");
    assert!(annotated.has_column("target_word_position"));
}
