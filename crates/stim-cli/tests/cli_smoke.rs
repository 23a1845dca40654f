use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

const TRIALS: &str = "\
seed_id,entropy,target_word,passage_variant
1,0.9,dog,The dog barked.
1,0.1,cat,A cat slept!
1,0.5,owl,One owl hooted
1,0.3,elk,An elk ran
2,0.2,sun,The sun rose.
2,0.4,sky,Blue sky above
2,0.8,sea,The sea churned
2,0.6,ice,Thin ice cracked
3,0.7,fog,Morning fog
";

fn stim_prep(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stim-prep"))
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run stim-prep")
}

#[test]
fn sublists_then_batch_annotate() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("trials.csv"), TRIALS).expect("write trials");

    let output = stim_prep(dir.path(), &["sublists", "trials.csv", "--report", "report.json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("COUNTERBALANCING VERIFICATION"));
    assert!(stdout.contains("2 of 2 seeds"));
    for index in 1..=4 {
        assert!(dir.path().join(format!("trial_list_sublist_{index}.csv")).exists());
    }

    let report: Value =
        serde_json::from_slice(&fs::read(dir.path().join("report.json")).expect("report"))
            .expect("json");
    assert_eq!(report["seeds_excluded"], serde_json::json!(["3"]));
    assert_eq!(report["seed_column"], "seed_id");

    let output = stim_prep(dir.path(), &["annotate"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Successfully processed 4 file(s)"));
    assert!(stdout.contains("final_pilot_stimuli.csv (file not found)"));

    let sublist = fs::read_to_string(dir.path().join("trial_list_sublist_1.csv")).expect("sublist");
    let header = sublist.lines().next().expect("header");
    assert_eq!(
        header,
        "seed_id,entropy,target_word,passage_variant,sublist,trial_number,target_word_position"
    );
    assert_eq!(sublist.lines().nth(1), Some("1,0.1,cat,A cat slept!,1,1,1"));
}

#[test]
fn missing_seed_column_fails_without_output() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("trials.csv"), "entropy,target_word\n0.1,a\n").expect("write");
    let output = stim_prep(dir.path(), &["sublists", "trials.csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: configuration error: no seed column found"));
    assert!(stderr.contains("code: stim.seed_column_missing"));
    assert!(!stderr.contains("ErrorInfo {"));
    assert!(!dir.path().join("trial_list_sublist_1.csv").exists());
}

#[test]
fn annotate_single_file_to_new_path() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("stimuli.csv"),
        "target_word,jabber_passage\njumps,The quick fox jumps.\n",
    )
    .expect("write");
    let output = stim_prep(dir.path(), &["annotate", "stimuli.csv", "out.csv"]);
    assert!(output.status.success());
    let annotated = fs::read_to_string(dir.path().join("out.csv")).expect("out");
    assert_eq!(annotated.lines().nth(1), Some("jumps,The quick fox jumps.,3"));
    let original = fs::read_to_string(dir.path().join("stimuli.csv")).expect("in");
    assert!(!original.contains("target_word_position"));
}
