use std::path::{Path, PathBuf};

use stim_core::errors::StimError;
use stim_core::{read_csv, write_csv};
use tracing::{error, info, warn};

use crate::annotate::{annotate, AnnotationReport};
use crate::config::AnnotateConfig;

/// Annotates one CSV file, writing to `output` or back over `input`.
pub fn preprocess_file(
    input: &Path,
    output: Option<&Path>,
    config: &AnnotateConfig,
) -> Result<AnnotationReport, StimError> {
    info!("Processing: {}", input.display());
    let table = read_csv(input)?;
    info!("Loaded {} rows", table.len());
    let annotation = annotate(&table, config)?;
    let target = output.unwrap_or(input);
    write_csv(&annotation.table, target)?;
    info!("Saved processed file: {}", target.display());
    Ok(annotation.report)
}

/// What happened to each file of a batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub processed: Vec<(PathBuf, AnnotationReport)>,
    /// Files that did not exist.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, StimError)>,
}

impl BatchOutcome {
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}

/// Annotates every file in place. Missing files are skipped and other
/// failures are logged; neither stops the batch.
pub fn process_batch(files: &[PathBuf], config: &AnnotateConfig) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for file in files {
        match preprocess_file(file, None, config) {
            Ok(report) => outcome.processed.push((file.clone(), report)),
            Err(err) if err.is_not_found() => {
                warn!("Skipping {} (file not found)", file.display());
                outcome.skipped.push(file.clone());
            }
            Err(err) => {
                error!("Error processing {}: {err}", file.display());
                outcome.failed.push((file.clone(), err));
            }
        }
    }
    info!("Successfully processed {} file(s)", outcome.processed_count());
    outcome
}
