use std::fs::{self, File};
use std::path::{Path, PathBuf};

use stim_core::errors::{ErrorInfo, StimError};
use stim_core::{file_sha256, read_csv, to_canonical_json_bytes, write_csv};
use tracing::info;

use crate::config::SublistConfig;
use crate::report::GenerationReport;
use crate::rotation::{generate, Generation};
use crate::summary::SummaryRecord;

/// `<out_dir>/<prefix>_<index>.csv`
pub fn sublist_path(out_dir: &Path, prefix: &str, index: usize) -> PathBuf {
    out_dir.join(format!("{prefix}_{index}.csv"))
}

/// `<out_dir>/<prefix>_summary.csv`
pub fn summary_path(out_dir: &Path, prefix: &str) -> PathBuf {
    out_dir.join(format!("{prefix}_summary.csv"))
}

/// Writes the summary table with columns `sublist, seed, entropy, target_word, trial_number`.
pub fn write_summary(records: &[SummaryRecord], path: &Path) -> Result<(), StimError> {
    let file =
        File::create(path).map_err(|err| StimError::from_io("stim.summary_create", path, err))?;
    let mut wtr = csv::Writer::from_writer(file);
    let csv_err = |err: csv::Error| {
        StimError::Csv(
            ErrorInfo::new("stim.summary_write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    };
    if records.is_empty() {
        wtr.write_record(["sublist", "seed", "entropy", "target_word", "trial_number"])
            .map_err(csv_err)?;
    }
    for record in records {
        wtr.serialize(record).map_err(csv_err)?;
    }
    wtr.flush()
        .map_err(|err| StimError::from_io("stim.summary_write", path, err))
}

/// Persists the four sublists followed by the summary; returns the paths
/// written, in that order.
pub fn write_generation(
    generation: &Generation,
    out_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, StimError> {
    fs::create_dir_all(out_dir).map_err(|err| StimError::from_io("stim.output_dir", out_dir, err))?;
    let mut written = Vec::with_capacity(generation.sublists.len() + 1);
    for sublist in &generation.sublists {
        let path = sublist_path(out_dir, prefix, sublist.index);
        write_csv(&sublist.table, &path)?;
        info!("Saved {} with {} trials", path.display(), sublist.table.len());
        written.push(path);
    }
    let path = summary_path(out_dir, prefix);
    write_summary(&generation.summary, &path)?;
    info!("Saved {}", path.display());
    written.push(path);
    Ok(written)
}

/// Outcome of [`generate_file`].
#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub generation: Generation,
    pub outputs: Vec<PathBuf>,
    pub report: GenerationReport,
}

/// Reads `input`, generates the sublists and writes them under `out_dir`.
/// Nothing is written when generation fails.
pub fn generate_file(
    input: &Path,
    config: &SublistConfig,
    out_dir: &Path,
) -> Result<GenerationRun, StimError> {
    let table = read_csv(input)?;
    let input_sha256 = file_sha256(input)?;
    let generation = generate(&table, config)?;
    let outputs = write_generation(&generation, out_dir, &config.output_prefix)?;
    let report = GenerationReport::build(
        &generation,
        Some(input.display().to_string()),
        Some(input_sha256),
        &outputs,
    );
    Ok(GenerationRun {
        generation,
        outputs,
        report,
    })
}

/// Writes a report as canonical JSON.
pub fn write_report(report: &GenerationReport, path: &Path) -> Result<(), StimError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StimError::from_io("stim.output_dir", parent, err))?;
    }
    let bytes = to_canonical_json_bytes(report)?;
    fs::write(path, bytes).map_err(|err| StimError::from_io("stim.report_write", path, err))
}
